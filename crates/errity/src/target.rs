//! Capabilities of a function that can be wrapped.
//!
//! The caller picks the execution strategy by the trait the target satisfies:
//! [`Target`] runs on the caller's thread, [`AsyncTarget`] returns a future.
//! Closures get both through blanket implementations, so most code never
//! implements these traits by hand.
//!
//! Arguments travel as a single value; use a tuple for several.

use std::future::Future;

/// A synchronous function that may fail.
///
/// # Examples
///
/// ```rust
/// use errity::target::Target;
///
/// let parse = |raw: &'static str| raw.parse::<u32>();
/// assert_eq!(parse.invoke("42"), Ok(42));
/// ```
pub trait Target<A> {
    /// Value returned on success.
    type Output;

    /// Opaque failure payload.
    type Error;

    /// Run the function once.
    fn invoke(&self, args: A) -> Result<Self::Output, Self::Error>;
}

impl<F, A, T, E> Target<A> for F
where
    F: Fn(A) -> Result<T, E>,
{
    type Output = T;
    type Error = E;

    fn invoke(&self, args: A) -> Result<T, E> {
        self(args)
    }
}

/// An asynchronous function that may fail.
///
/// Implemented for every closure returning a `Send` future of a `Result`.
/// Implement it by hand for types that own their state:
///
/// ```rust
/// use errity::target::AsyncTarget;
/// use std::future::Future;
///
/// struct Echo;
///
/// impl AsyncTarget<String> for Echo {
///     type Output = String;
///     type Error = std::io::Error;
///
///     fn invoke(&self, args: String) -> impl Future<Output = Result<String, std::io::Error>> + Send {
///         async move { Ok(args) }
///     }
/// }
/// ```
pub trait AsyncTarget<A> {
    /// Value the future resolves to on success.
    type Output;

    /// Opaque failure payload.
    type Error;

    /// Start one attempt.
    fn invoke(&self, args: A) -> impl Future<Output = Result<Self::Output, Self::Error>> + Send;
}

impl<F, A, Fut, T, E> AsyncTarget<A> for F
where
    F: Fn(A) -> Fut,
    Fut: Future<Output = Result<T, E>> + Send,
{
    type Output = T;
    type Error = E;

    fn invoke(&self, args: A) -> impl Future<Output = Result<T, E>> + Send {
        self(args)
    }
}
