#[cfg(test)]
mod regression {
    /// Reusing one interpreter across runs, the way the prompt does, must
    /// not leak resolver depths between them. The second line's `print y`
    /// reuses an expression id from the first line; a stale entry would send
    /// the global read through `get_at` and panic walking the scope chain.
    #[test]
    fn locals_reset_between_runs() {
        use lox_lang::lox;

        let mut output = Vec::new();
        let mut lox = lox::new(&mut output);

        lox.run("fun f(x) { { print x; } }");
        lox.run("var y = 1; print y;");

        drop(lox);
        assert_eq!("1\n", std::str::from_utf8(&output).unwrap());
    }

    /// A stale depth that happens to land on a live binding reads the wrong
    /// variable instead of panicking. `print a` below resolves to the
    /// global, but a depth left over from the previous line would redirect
    /// it to the `a` declared after `show`.
    #[test]
    fn stale_depths_do_not_redirect_global_reads() {
        use lox_lang::lox;

        let mut output = Vec::new();
        let mut lox = lox::new(&mut output);

        lox.run("var a = \"global\";");
        lox.run("fun f(x) { { print x; } }");
        lox.run("fun g() { fun show() { print a; } var a = \"late\"; show(); } g();");

        drop(lox);
        assert_eq!("global\n", std::str::from_utf8(&output).unwrap());
    }
}
