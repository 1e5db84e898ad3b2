mod lib;
mod snapshots;

use nestest::{Registry, assert::assert};

#[test]
fn marker_comes_before_output_of_failing_case() {
    let mut registry = Registry::new();
    registry.add("chatty", || {
        nestest::println!("written before failing");
        assert(false, "chatty failed")
    });

    let (combined, result) = lib::run_combined(&registry);
    let marker = combined.find("- ✗ chatty").unwrap();
    let detail = combined.find("Assertion failed: chatty failed").unwrap();
    let output = combined.find("written before failing").unwrap();
    assert!(marker < detail);
    assert!(detail < output);
    assert_eq!(result.unwrap_err().report.failed, ["chatty"]);
}

#[test]
fn combined_stream_for_passing_group() {
    let mut group = Registry::new();
    group.add("speaks", || nestest::println!("said something"));
    group.add("warns", || nestest::warnln!("watch out"));
    let mut registry = Registry::new();
    registry.add("G", group);

    let (combined, result) = lib::run_combined(&registry);
    pretty_assertions::assert_eq!(
        combined,
        concat!(
            "\n[ Test Runner ]\n\n",
            "- v G\n",
            "  |  - ✓ speaks\n",
            "  |  said something\n",
            "  |  - ✓ warns\n",
            "  |  watch out\n",
            "- ^ G\n",
            "\nAll 2 tests passed\n",
        )
    );
    assert_eq!(result.unwrap().leaf_count, 2);
}

#[test]
fn same_registry_twice() {
    let mut registry = Registry::new();
    registry.add("a", || assert(false, "a"));
    registry.add("b", || ());

    let first = lib::run_split(&registry);
    let second = lib::run_split(&registry);
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first.stderr, second.stderr);
    assert_eq!(first.result, second.result);
}
