#[macro_export]
macro_rules! print_error {
    ($($arg:tt)*) => (eprintln!("[wfind error]: {}", format!($($arg)*)))
}

#[macro_export]
macro_rules! print_error_and_exit {
    ($($arg:tt)*) => {{
        $crate::print_error!($($arg)*);
        ::std::process::exit(1)
    }};
}
