/// Yields the sole item of an iterator, `None` when it is empty or has more than one.
pub trait OnlyExt: Iterator {
    fn only(self) -> Option<Self::Item>;
}

impl<I: Iterator> OnlyExt for I {
    fn only(mut self) -> Option<Self::Item> {
        let first = self.next()?;
        if self.next().is_some() {
            None
        } else {
            Some(first)
        }
    }
}
