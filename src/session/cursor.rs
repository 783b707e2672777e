/// Highlighted row in a vertical list. Wraps at both ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListCursor {
    pub index: usize,
}

impl ListCursor {
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            self.index = 0;
            return;
        }
        self.index = (self.index + 1) % len;
    }

    pub fn prev(&mut self, len: usize) {
        if len == 0 {
            self.index = 0;
        } else if self.index > 0 {
            self.index = (self.index - 1).min(len - 1);
        } else {
            self.index = len - 1;
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps() {
        let mut c = ListCursor::default();
        c.next(3);
        c.next(3);
        assert_eq!(c.index, 2);
        c.next(3);
        assert_eq!(c.index, 0);
    }

    #[test]
    fn test_prev_wraps() {
        let mut c = ListCursor::default();
        c.prev(4);
        assert_eq!(c.index, 3);
        c.prev(4);
        assert_eq!(c.index, 2);
    }

    #[test]
    fn test_empty_list_stays_at_zero() {
        let mut c = ListCursor { index: 5 };
        c.next(0);
        assert_eq!(c.index, 0);
        c.prev(0);
        assert_eq!(c.index, 0);
    }
}
