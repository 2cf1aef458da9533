#[macro_use]
mod common;

#[cfg(test)]
mod while_stmt {
    tests! {
        countdown in while is OK
        "3"
        "2"
        "1"
    }

    tests! {
        condition_is_truthy in while is OK
        "done"
    }
}
