/// Declares a trimmed, non-empty string newtype.
macro_rules! nutype_string {
    ($(#[doc = $doc:literal])* $ident:ident) => {
        $(#[doc = $doc])*
        #[::nutype::nutype(
            sanitize(trim),
            validate(not_empty),
            derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
        )]
        pub struct $ident(String);
    };
}

pub(crate) use nutype_string;
