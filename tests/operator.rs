#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        add in operator is OK
        "3"
        "ab"
    }

    tests! {
        arithmetic in operator is OK
        "4.5"
        "42"
        "2.5"
    }

    tests! {
        comparison in operator is OK
        "true"
        "true"
        "false"
        "true"
    }

    tests! {
        equality in operator is OK
        "true"
        "false"
        "false"
        "true"
        "true"
        "true"
    }

    tests! {
        negate in operator is OK
        "-3"
        "3"
    }

    tests! {
        not in operator is OK
        "true"
        "true"
        "false"
        "false"
        "false"
    }

    tests! {
        add_mixed in operator is ERR(70)
        "Operands must be two numbers or two strings."
        "[line 1]"
    }

    tests! {
        divide_by_zero in operator is ERR(70)
        "Division by zero."
        "[line 1]"
    }

    tests! {
        negate_string in operator is ERR(70)
        "Operand must be a number."
        "[line 1]"
    }

    tests! {
        compare_strings in operator is ERR(70)
        "Operand must be a number."
        "[line 1]"
    }

    /// Output produced before the failing statement still reaches stdout.
    #[test]
    fn add_then_fail() {
        use assert_cmd::Command;

        Command::cargo_bin("lox").unwrap()
            .arg("tests/scripts/operator/add_then_fail.lox")
            .assert()
            .stdout("ab\n")
            .stderr("Operands must be two numbers or two strings.\n[line 2]\n")
            .code(70);
    }
}
