use std::process::ExitCode;

use futures::executor::block_on;
use nestest::{
    Registry,
    assert::{assert, assert_equals},
};

fn main() -> ExitCode {
    nestest::test("test assertion true", || assert(true, "true"));
    nestest::test("test assertion false", || assert(false, "false"));

    let mut equality = Registry::new();
    equality.add("test assert equals", || assert_equals(&1, &1, Some("1 == 1")));
    equality.add("test assert not equals", || {
        assert_equals(&1, &2, Some("1 != 2"))
    });
    equality.add("test assert not equals default msg", || {
        nestest::println!("comparing 3 with 4");
        assert_equals(&3, &4, None)
    });
    nestest::test("equality", equality);

    match block_on(nestest::run_tests()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
