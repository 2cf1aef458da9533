#[macro_use]
mod common;

#[cfg(test)]
mod string {
    tests! {
        multiline in string is OK
        "line one"
        "line two"
    }

    tests! {
        concatenation in string is OK
        "Hello, World!"
    }

    tests! {
        unterminated in string is ERR(65)
        "[line 1] Error: Unterminated string."
    }
}
