use nestest::{
    Entry, Registry,
    assert::{assert, assert_equals},
};

use crate::lib::snapshot;

fn registry(entries: impl IntoIterator<Item = (&'static str, Entry)>) -> Registry {
    let mut registry = Registry::new();
    for (name, entry) in entries {
        registry.add(name, entry);
    }
    registry
}

snapshot!(empty: Registry::new() => {
    stdout: "\n[ Test Runner ]\n\n\nAll 0 tests passed\n",
    stderr: "",
    failed: [],
    leaf_count: 0,
});

snapshot!(empty_group: registry([("nothing", Entry::from(Registry::new()))]) => {
    stdout: "\n[ Test Runner ]\n\n- v nothing\n- ^ nothing\n\nAll 0 tests passed\n",
    stderr: "",
    failed: [],
    leaf_count: 0,
});

snapshot!(assertions: registry([
    ("test assertion true", Entry::from(|| assert(true, "true"))),
    ("test assertion false", Entry::from(|| assert(false, "false"))),
    ("test assert equals", Entry::from(|| assert_equals(&1, &1, Some("1 == 1")))),
    ("test assert not equals", Entry::from(|| assert_equals(&1, &2, Some("1 != 2")))),
    ("test assert not equals default msg", Entry::from(|| assert_equals(&3, &4, None))),
]) => {
    stdout: concat!(
        "\n[ Test Runner ]\n\n",
        "- ✓ test assertion true\n",
        "- ✓ test assert equals\n",
        "\n",
    ),
    stderr: concat!(
        "- ✗ test assertion false\n",
        "Assertion failed: false\n",
        "- ✗ test assert not equals\n",
        "Assertion failed: 1 != 2\n",
        "- ✗ test assert not equals default msg\n",
        "Assertion failed: \n",
        "  > expected: 4\n",
        "  < received: 3\n",
        "\n3/5 test(s) failed\n\n",
        "- test assertion false failed\n",
        "- test assert not equals failed\n",
        "- test assert not equals default msg failed\n",
    ),
    failed: [
        "test assertion false",
        "test assert not equals",
        "test assert not equals default msg",
    ],
    leaf_count: 5,
});

snapshot!(group_with_pass_and_fail: registry([(
    "G",
    Entry::from(registry([
        ("pass", Entry::from(|| assert(true, ""))),
        ("fail", Entry::from(|| assert(false, ""))),
    ])),
)]) => {
    stdout: "\n[ Test Runner ]\n\n- v G\n  |  - ✓ pass\n- ^ G\n\n",
    stderr: concat!(
        "  |  - ✗ fail\n",
        "  |  Assertion failed\n",
        "\n1/2 test(s) failed\n\n",
        "- G -> fail failed\n",
    ),
    failed: ["G -> fail"],
    leaf_count: 2,
});

snapshot!(nested_panic: registry([
    (
        "outer",
        Entry::from(registry([
            (
                "logs",
                Entry::from(|| {
                    nestest::println!("hello");
                    nestest::warnln!("careful");
                }),
            ),
            (
                "middle",
                Entry::from(registry([(
                    "leafname",
                    Entry::from(|| -> () {
                        nestest::eprintln!("about to fail");
                        panic!("deep failure");
                    }),
                )])),
            ),
        ])),
    ),
    ("after", Entry::from(|| ())),
]) => {
    stdout: concat!(
        "\n[ Test Runner ]\n\n",
        "- v outer\n",
        "  |  - ✓ logs\n",
        "  |  hello\n",
        "  |  - v middle\n",
        "  |  - ^ middle\n",
        "- ^ outer\n",
        "- ✓ after\n",
        "\n",
    ),
    stderr: concat!(
        "  |  careful\n",
        "  |    |  - ✗ leafname\n",
        "  |    |  panicked: deep failure\n",
        "  |    |  about to fail\n",
        "  |    |  action panicked at <location>\n",
        "\n1/3 test(s) failed\n\n",
        "- outer -> middle -> leafname failed\n",
    ),
    failed: ["outer -> middle -> leafname"],
    leaf_count: 3,
});

snapshot!(duplicates: registry([
    ("twin", Entry::from(|| Err::<(), _>("first twin"))),
    ("twin", Entry::from(|| Err::<(), _>("second twin"))),
]) => {
    stdout: "\n[ Test Runner ]\n\n\n",
    stderr: concat!(
        "- ✗ twin\n",
        "Error: first twin\n",
        "- ✗ twin\n",
        "Error: second twin\n",
        "\n2/2 test(s) failed\n\n",
        "- twin failed\n",
        "- twin failed\n",
    ),
    failed: ["twin", "twin"],
    leaf_count: 2,
});
