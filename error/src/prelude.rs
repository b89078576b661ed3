//! Macros to define errors which are tagged with a kind.

pub use thiserror::Error;

/// Defines an error type `$error` which wraps any reason and tags it with `$error_kind`.
///
/// `$error_kind` gains two constructors: `because(reason)` for typed reasons and
/// `other(message)` for plain messages.
#[macro_export]
macro_rules! def_error_base_on_kind {
    ($error:ident, $error_kind:ty, $comment_error:expr, $comment_because:expr, $comment_other:expr $(,)?) => {
        #[doc = $comment_error]
        #[derive(Error, Debug, Clone)]
        pub struct $error {
            kind: $error_kind,
            inner: $crate::AnyError,
        }

        impl ::std::fmt::Display for $error {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                match self.cause() {
                    Some(err) if err.downcast_ref::<$crate::SilentError>().is_none() => {
                        if f.alternate() {
                            write!(f, "{}: {}", self.kind(), err)
                        } else {
                            write!(f, "{}({})", self.kind(), err)
                        }
                    }
                    _ => write!(f, "{}", self.kind()),
                }
            }
        }

        impl From<$error_kind> for $error {
            fn from(kind: $error_kind) -> Self {
                kind.because($crate::SilentError)
            }
        }

        impl $error_kind {
            #[doc = $comment_because]
            pub fn because<E>(self, reason: E) -> $error
            where
                E: ::std::error::Error + Send + Sync + 'static,
            {
                $error {
                    kind: self,
                    inner: reason.into(),
                }
            }

            #[doc = $comment_other]
            pub fn other<T>(self, reason: T) -> $error
            where
                T: ::std::fmt::Display + ::std::fmt::Debug + Send + Sync + 'static,
            {
                $error {
                    kind: self,
                    inner: $crate::OtherError::new(reason).into(),
                }
            }
        }

        impl $error {
            /// Returns the kind of this error.
            pub fn kind(&self) -> $error_kind {
                self.kind
            }

            /// Attempts to downcast the inner reason by reference.
            pub fn downcast_ref<T>(&self) -> Option<&T>
            where
                T: ::std::fmt::Display + ::std::fmt::Debug + Send + Sync + 'static,
            {
                self.inner.downcast_ref::<T>()
            }

            /// The lowest level cause of this error.
            pub fn root_cause(&self) -> &(dyn ::std::error::Error + 'static) {
                self.inner.root_cause()
            }

            /// The reason this error was created with.
            pub fn cause(&self) -> Option<&(dyn ::std::error::Error + 'static)> {
                self.inner.chain().next()
            }
        }
    };
    ($error:ident, $error_kind:ty, $comment_error:expr $(,)?) => {
        $crate::def_error_base_on_kind!(
            $error,
            $error_kind,
            $comment_error,
            concat!(
                "Creates `",
                stringify!($error),
                "` base on `",
                stringify!($error_kind),
                "` with an error reason."
            ),
            concat!(
                "Creates `",
                stringify!($error),
                "` base on `",
                stringify!($error_kind),
                "` with a simple string."
            )
        );
    };
}

/// Implements `From<$source>` for `$target` by tagging the source with `$kind`.
#[macro_export]
macro_rules! impl_error_conversion_with_kind {
    ($source:ty, $kind:expr, $target:ty) => {
        impl ::std::convert::From<$source> for $target {
            fn from(source: $source) -> $target {
                $kind.because(source).into()
            }
        }
    };
}
