//! Helper macro for declaring port error enums with snake-case constructors.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
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
    //! Regression coverage for this module.
    define_port_error! {
        pub enum StoreError {
            Offline => "store offline",
            Rejected { reason: String } => "store rejected write: {reason}",
            Clash { username: String, attempts: u8 } => "{username} clashed {attempts} times",
        }
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(StoreError::offline(), StoreError::Offline);
        assert_eq!(StoreError::offline().to_string(), "store offline");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = StoreError::rejected("quota");
        assert_eq!(err.to_string(), "store rejected write: quota");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = StoreError::clash("alice", 2_u8);
        assert_eq!(err.to_string(), "alice clashed 2 times");
    }
}
