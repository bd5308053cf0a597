use stack_panel::AppError;

#[test]
fn display_prefixes_each_variant() {
    let cases = [
        (AppError::Config("bad".into()), "config: bad"),
        (AppError::Credential("denied".into()), "credential: denied"),
        (AppError::Properties("gone".into()), "properties: gone"),
        (AppError::Script("refused".into()), "script: refused"),
        (AppError::Io("pipe".into()), "io: pipe"),
    ];

    for (err, expected) in cases {
        assert_eq!(err.to_string(), expected);
    }
}

#[test]
fn io_errors_convert_to_io_variant() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err = AppError::from(io);
    assert!(matches!(err, AppError::Io(_)));
    assert!(err.to_string().contains("missing"));
}

#[test]
fn errors_are_std_error() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    assert_error(&AppError::Io("pipe".into()));
}
