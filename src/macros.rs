// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression: literals, consts, or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! non_empty {
    // Optional-text shorthand!
    // Trims; blank → None, anything else → Some(owned trimmed text).
    ($expr:expr) => {
        match ::core::convert::AsRef::<str>::as_ref(&$expr).trim() {
            "" => None,
            t => Some(::std::string::String::from(t)),
        }
    };
}
