#[macro_export]
macro_rules! tests {
    ($file:ident in $scope:ident is OK $($expected:expr)*) => {
        #[test]
        fn $file() {
            use lox_lang::lox;

            let mut expected = vec![$($expected),*];

            // if exists, concat expected lines with new lines
            let expected = match expected.len() {
                0 => "".to_string(),
                _ => {
                    // add empty string to end to add new line to end of output
                    expected.push("");
                    expected.join("\n")
                }
            };

            let mut output = Vec::new();
            let mut lox = lox::new(&mut output);

            lox.run_file(format!("tests/scripts/{}/{}.lox", stringify!($scope), stringify!($file)));

            // drop lox here to release the borrow on output before reading it
            drop(lox);
            assert_eq!(expected, std::str::from_utf8(&output).unwrap());
        }
    };

    ($file:ident in $scope:ident is ERR($code:expr) $($expected:expr)+) => {
        #[test]
        fn $file() {
            use assert_cmd::Command;

            // stderr concats expected with new line
            let output = vec![$($expected),+].join("\n");
            let file = format!("tests/scripts/{}/{}.lox", stringify!($scope), stringify!($file));

            Command::cargo_bin("lox").unwrap()
                .arg(file)
                .assert()
                .stderr(format!("{output}\n"))
                .code($code);
        }
    };
}
