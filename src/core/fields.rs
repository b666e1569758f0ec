//! Field splitting
//!
//! Partitions one input chunk into maximal spans, each ending exactly on a
//! byte matching the predicate, except possibly the last. Spans are
//! contiguous and non-overlapping, so concatenating them rebuilds the chunk.
//! The iterator is lazy and `Clone`, so a caller can restart it without
//! re-scanning anything already consumed.

/// Lazy span iterator over a single chunk
#[derive(Debug, Clone)]
pub struct Fields<'a, P> {
    rest: &'a [u8],
    is_sep: P,
}

impl<'a, P> Fields<'a, P>
where
    P: Fn(u8) -> bool,
{
    pub fn new(data: &'a [u8], is_sep: P) -> Self {
        Self { rest: data, is_sep }
    }
}

impl<'a, P> Iterator for Fields<'a, P>
where
    P: Fn(u8) -> bool,
{
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let end = match self.rest.iter().position(|&b| (self.is_sep)(b)) {
            Some(i) => i + 1,
            None => self.rest.len(),
        };

        let (field, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(field)
    }
}

impl<P> std::iter::FusedIterator for Fields<'_, P> where P: Fn(u8) -> bool {}

/// Bytes escaped by `-v`: control codes, DEL and everything with the high bit set
pub fn is_nonprint(b: u8) -> bool {
    !(32..127).contains(&b)
}

/// Split after every occurrence of `sep`
pub fn split_on_byte(data: &[u8], sep: u8) -> Fields<'_, impl Fn(u8) -> bool + Clone> {
    Fields::new(data, move |b| b == sep)
}

/// Split into logical lines, each keeping its terminating `\n`
pub fn split_lines(data: &[u8]) -> Fields<'_, impl Fn(u8) -> bool + Clone> {
    split_on_byte(data, b'\n')
}

/// Split after every non-printable byte
pub fn split_on_nonprint(data: &[u8]) -> Fields<'_, fn(u8) -> bool> {
    Fields::new(data, is_nonprint as fn(u8) -> bool)
}

/// Separate a span into its body and terminating byte, if it ends on `sep`
pub fn strip_terminator(field: &[u8], sep: u8) -> Option<&[u8]> {
    match field.split_last() {
        Some((&last, body)) if last == sep => Some(body),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(data: &[u8]) -> Vec<&[u8]> {
        split_lines(data).collect()
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(lines(b"").is_empty());
        assert!(split_on_nonprint(b"").next().is_none());
    }

    #[test]
    fn test_no_match_yields_whole_input() {
        assert_eq!(lines(b"abc"), vec![&b"abc"[..]]);
    }

    #[test]
    fn test_spans_end_on_separator() {
        assert_eq!(
            lines(b"a\n\nbc\nd"),
            vec![&b"a\n"[..], &b"\n"[..], &b"bc\n"[..], &b"d"[..]]
        );
        assert_eq!(lines(b"\n\n"), vec![&b"\n"[..], &b"\n"[..]]);
    }

    #[test]
    fn test_spans_reconstruct_input() {
        let data = b"x\ty\x01z\x7f\xff\nrest";
        let joined: Vec<u8> = split_on_nonprint(data).flatten().copied().collect();
        assert_eq!(joined, data);
    }

    #[test]
    fn test_nonprint_split_points() {
        let spans: Vec<&[u8]> = split_on_nonprint(b"ab\x01cd\x80").collect();
        assert_eq!(spans, vec![&b"ab\x01"[..], &b"cd\x80"[..]]);
    }

    #[test]
    fn test_clone_restarts_from_same_position() {
        let mut fields = split_on_byte(b"a,b,c", b',');
        fields.next();
        let again: Vec<&[u8]> = fields.clone().collect();
        let rest: Vec<&[u8]> = fields.collect();
        assert_eq!(again, rest);
        assert_eq!(rest, vec![&b"b,"[..], &b"c"[..]]);
    }

    #[test]
    fn test_is_nonprint_boundaries() {
        assert!(is_nonprint(0));
        assert!(is_nonprint(31));
        assert!(!is_nonprint(32));
        assert!(!is_nonprint(126));
        assert!(is_nonprint(127));
        assert!(is_nonprint(255));
    }

    #[test]
    fn test_strip_terminator() {
        assert_eq!(strip_terminator(b"ab\n", b'\n'), Some(&b"ab"[..]));
        assert_eq!(strip_terminator(b"\n", b'\n'), Some(&b""[..]));
        assert_eq!(strip_terminator(b"ab", b'\n'), None);
        assert_eq!(strip_terminator(b"", b'\n'), None);
    }
}
