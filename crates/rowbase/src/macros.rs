/// Declares a model type backed by a [`Record`](crate::Record).
///
/// ```
/// use rowbase::{model, Field};
///
/// model! {
///     #[table = "users"]
///     pub struct User {
///         id: Field::string().ddl("varchar(50)").primary_key(),
///         email: Field::string().ddl("varchar(50)"),
///         admin: Field::boolean(),
///         name: Field::string().default("anon"),
///     }
/// }
/// ```
///
/// The table defaults to the type name when `#[table = ..]` is omitted; when
/// present it must come before any other attribute. The generated type
/// derives `Debug`, `Clone`, `Default` and `PartialEq`, and dereferences to
/// its record.
#[macro_export]
macro_rules! model {
    (
        @define [$( #[$meta:meta] )*] $vis:vis $name:ident
        ($table:expr)
        { $( $attr:ident : $field:expr ),* }
    ) => {
        $( #[$meta] )*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            record: $crate::Record,
        }

        impl $name {
            pub fn new() -> $name {
                <$name as ::std::default::Default>::default()
            }
        }

        impl $crate::Model for $name {
            const NAME: &'static str = ::std::stringify!($name);
            const TABLE: ::std::option::Option<&'static str> = $table;

            fn fields() -> ::std::vec::Vec<(&'static str, $crate::Field)> {
                ::std::vec![ $( (::std::stringify!($attr), $field) ),* ]
            }

            fn from_record(record: $crate::Record) -> $name {
                $name { record }
            }

            fn as_record(&self) -> &$crate::Record {
                &self.record
            }

            fn as_record_mut(&mut self) -> &mut $crate::Record {
                &mut self.record
            }
        }

        impl ::std::convert::From<$crate::Record> for $name {
            fn from(record: $crate::Record) -> $name {
                $name { record }
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = $crate::Record;

            fn deref(&self) -> &$crate::Record {
                &self.record
            }
        }

        impl ::std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut $crate::Record {
                &mut self.record
            }
        }
    };
    (
        #[table = $table:literal]
        $( #[$meta:meta] )*
        $vis:vis struct $name:ident {
            $( $attr:ident : $field:expr ),* $(,)?
        }
    ) => {
        $crate::model! {
            @define [$( #[$meta] )*] $vis $name
            (::std::option::Option::Some($table))
            { $( $attr : $field ),* }
        }
    };
    (
        $( #[$meta:meta] )*
        $vis:vis struct $name:ident {
            $( $attr:ident : $field:expr ),* $(,)?
        }
    ) => {
        $crate::model! {
            @define [$( #[$meta] )*] $vis $name
            (::std::option::Option::None)
            { $( $attr : $field ),* }
        }
    };
}
