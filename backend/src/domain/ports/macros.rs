//! Helper macro for declaring port error enums with snake_case constructors.
//!
//! Each variant gets a `thiserror` message and a constructor named after the
//! variant, taking `impl Into<T>` for every field:
//!
//! ```ignore
//! define_port_error! {
//!     pub enum PostPersistenceError {
//!         Query { message: String } => "post query failed: {message}",
//!     }
//! }
//! let err = PostPersistenceError::query("boom");
//! ```

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum ExamplePortError {
            Unavailable => "store unavailable",
            Query { message: String } => "query failed: {message}",
            Duplicate { key: String, count: u32 } => "duplicate {key} ({count})",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(ExamplePortError::unavailable().to_string(), "store unavailable");
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ExamplePortError::query("boom");
        assert_eq!(err.to_string(), "query failed: boom");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = ExamplePortError::duplicate("alice", 2_u32);
        assert_eq!(err.to_string(), "duplicate alice (2)");
    }
}
