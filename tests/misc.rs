#[macro_use]
mod common;

#[cfg(test)]
mod misc {
    tests! {
        clock in misc is OK
        "true"
    }

    tests! {
        unexpected_character in misc is ERR(65)
        "[line 1] Error: Unexpected character."
    }

    /// More than one argument prints the usage and exits with 64.
    #[test]
    fn usage() {
        use assert_cmd::Command;

        Command::cargo_bin("lox").unwrap()
            .args(["one.lox", "two.lox"])
            .assert()
            .stdout("Usage: lox [script]\n")
            .code(64);
    }
}
