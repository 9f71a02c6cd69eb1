/// Accumulates issues for one report, applying the pedantic policy.
#[derive(Debug)]
pub(crate) struct IssueSink<I> {
    pedantic: bool,
    pub errors: Vec<I>,
    pub warnings: Vec<I>,
}

impl<I> IssueSink<I> {
    pub fn new(pedantic: bool) -> Self {
        Self {
            pedantic,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn error(&mut self, issue: I) {
        self.errors.push(issue);
    }

    /// Pedantic mode promotes every warning to an error.
    pub fn warning(&mut self, issue: I) {
        if self.pedantic {
            self.errors.push(issue);
        } else {
            self.warnings.push(issue);
        }
    }

    pub fn into_parts(self) -> (Vec<I>, Vec<I>) {
        (self.errors, self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pedantic_promotes_warnings() {
        let mut relaxed = IssueSink::new(false);
        relaxed.warning(1);
        relaxed.error(2);
        assert_eq!(relaxed.into_parts(), (vec![2], vec![1]));

        let mut strict = IssueSink::new(true);
        strict.warning(1);
        strict.error(2);
        assert_eq!(strict.into_parts(), (vec![1, 2], vec![]));
    }
}
