//! Production for constructors that can fail.
//!
//! When a table's product type is `Result<T, E>` the `try_` operations
//! unwrap it: the first constructor error stops production and is returned
//! as-is.

use tracing::trace;

use super::Registry;

impl<C, I: Clone, T, E> Registry<C, I, Result<T, E>> {
    /// Build one product per matching entry, stopping at the first error.
    ///
    /// Constructors after a failing one are not run, and products already
    /// built by earlier ones are dropped.
    pub fn try_produce_all(&self, criterion: &C, inputs: I) -> Result<Vec<T>, E> {
        let produced = self
            .matching(criterion)
            .map(|e| e.construct(inputs.clone()))
            .collect::<Result<Vec<T>, E>>();
        if produced.is_err() {
            trace!("Constructor failed during production");
        }
        produced
    }
}

impl<C, I, T, E> Registry<C, I, Result<T, E>> {
    /// Build the product of the first matching entry.
    ///
    /// `Ok(None)` means no entry matched; `Err` is the constructor's own
    /// error.
    pub fn try_produce_one(&self, criterion: &C, inputs: I) -> Result<Option<T>, E> {
        self.produce_one(criterion, inputs).transpose()
    }
}

#[cfg(test)]
mod tests {
    use crate::registry::Registry;
    use std::cell::Cell;

    type Parsers = Registry<&'static str, String, Result<u32, String>>;

    fn is_decimal(kind: &&'static str) -> bool {
        *kind == "dec"
    }

    fn is_hex(kind: &&'static str) -> bool {
        *kind == "hex"
    }

    fn is_any(_: &&'static str) -> bool {
        true
    }

    fn parse_decimal(text: String) -> Result<u32, String> {
        text.parse().map_err(|_| format!("not decimal: {text}"))
    }

    fn parse_hex(text: String) -> Result<u32, String> {
        u32::from_str_radix(&text, 16).map_err(|_| format!("not hex: {text}"))
    }

    fn parsers() -> Parsers {
        let mut registry = Parsers::new();
        registry.register(is_decimal, parse_decimal);
        registry.register(is_hex, parse_hex);
        registry
    }

    #[test]
    fn try_produce_one_success() {
        assert_eq!(parsers().try_produce_one(&"hex", "ff".into()), Ok(Some(255)));
    }

    #[test]
    fn try_produce_one_no_match_is_none() {
        assert_eq!(parsers().try_produce_one(&"oct", "17".into()), Ok(None));
    }

    #[test]
    fn try_produce_one_passes_error_through() {
        assert_eq!(
            parsers().try_produce_one(&"dec", "ff".into()),
            Err("not decimal: ff".to_string())
        );
    }

    #[test]
    fn try_produce_all_collects_successes() {
        let mut registry = parsers();
        registry.register(is_any, parse_hex);
        assert_eq!(registry.try_produce_all(&"dec", "10".into()), Ok(vec![10, 16]));
    }

    #[test]
    fn try_produce_all_no_match_is_empty() {
        assert_eq!(parsers().try_produce_all(&"oct", "10".into()), Ok(vec![]));
    }

    thread_local! {
        static LATE_CALLS: Cell<u32> = const { Cell::new(0) };
    }

    fn counting_parse(text: String) -> Result<u32, String> {
        LATE_CALLS.with(|c| c.set(c.get() + 1));
        parse_hex(text)
    }

    #[test]
    fn try_produce_all_stops_at_first_error() {
        let mut registry = parsers();
        registry.register(is_any, counting_parse);

        LATE_CALLS.with(|c| c.set(0));
        assert_eq!(
            registry.try_produce_all(&"dec", "zz".into()),
            Err("not decimal: zz".to_string())
        );
        assert_eq!(LATE_CALLS.with(|c| c.get()), 0);
    }
}
