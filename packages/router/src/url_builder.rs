//! Building URLs from route patterns.

use urlencoding::encode;

use crate::pattern::{placeholder_name, SEPARATOR};

/// Fill the placeholders of `pattern` with `args`, left to right.
///
/// Every argument is percent-encoded. Placeholders left over once `args` runs out stay as they
/// are, and extra arguments are ignored.
///
/// ```rust
/// # use hashroute::build_url;
/// assert_eq!(build_url("item/:id/:name", [7.to_string(), "a b".to_string()]), "item/7/a%20b");
/// assert_eq!(build_url("item/:id/:name", [7]), "item/7/:name");
/// ```
pub fn build_url<I>(pattern: &str, args: I) -> String
where
    I: IntoIterator,
    I::Item: std::fmt::Display,
{
    let mut args = args.into_iter();

    pattern
        .split(SEPARATOR)
        .map(|segment| {
            if placeholder_name(segment).is_some() {
                if let Some(arg) = args.next() {
                    return encode(&arg.to_string()).into_owned();
                }
            }
            segment.to_string()
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Build a URL from a pattern and a list of arguments of any [`Display`](std::fmt::Display) type.
///
/// ```rust
/// # use hashroute::url;
/// assert_eq!(url!("item/:id/:name", 7, "a b"), "item/7/a%20b");
/// assert_eq!(url!("about"), "about");
/// ```
#[macro_export]
macro_rules! url {
    ($pattern:expr $(, $arg:expr)* $(,)?) => {
        $crate::build_url(
            $pattern,
            ::std::vec::Vec::<::std::string::String>::from([
                $(::std::string::ToString::to_string(&$arg)),*
            ]),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(build_url("q/:term", ["a/b?c#d"]), "q/a%2Fb%3Fc%23d");
    }

    #[test]
    fn extra_arguments_are_ignored() {
        assert_eq!(build_url("a/:x", ["1", "2", "3"]), "a/1");
    }

    #[test]
    fn missing_arguments_leave_placeholders() {
        assert_eq!(build_url("a/:x/:y", Vec::<String>::new()), "a/:x/:y");
    }

    #[test]
    fn literal_segments_are_untouched() {
        assert_eq!(build_url("!/a b/:x", ["c d"]), "!/a b/c%20d");
    }

    #[test]
    fn macro_accepts_mixed_types() {
        assert_eq!(crate::url!("item/:id/:name", 7, "a b"), "item/7/a%20b");
        assert_eq!(crate::url!("item/:id", 7u8, "ignored",), "item/7");
    }
}
