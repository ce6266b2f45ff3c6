use std::fmt::Debug;
use std::hash::Hash;

/// A column-bound sortable attribute of one entity.
///
/// Ordinals are part of the wire contract (listing `order` parameter and
/// pagination tokens) and must stay stable across releases.
pub trait SortField:
    Copy + Eq + Hash + Debug + Send + Sync + 'static
{
    /// Every variant, in ordinal order.
    const ALL: &'static [Self];

    fn ordinal(self) -> i32;

    /// Snake-case label used in logs and tooling output.
    fn name(self) -> &'static str;

    fn from_ordinal(ordinal: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.ordinal() == ordinal)
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.name() == name)
    }
}

macro_rules! sort_fields {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $ordinal:literal => $label:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
        #[repr(i32)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant = $ordinal,
            )+
        }

        impl $crate::sort::SortField for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn ordinal(self) -> i32 {
                self as i32
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::sort::SortField::name(*self))
            }
        }
    };
}
