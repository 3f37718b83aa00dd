use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::error::InstanceError;
use crate::problem::Problem;

fn parse_token<T: FromStr>(token: &str, line: usize) -> Result<T, InstanceError> {
    token.parse::<T>().map_err(|_| InstanceError::InvalidToken { line, token: token.to_string() })
}

fn at_line(line: usize) -> impl FnOnce(InstanceError) -> InstanceError {
    move |source| InstanceError::AtLine { line, source: Box::new(source) }
}

impl Problem {
    /// Reads an instance in the format
    ///
    /// ```text
    /// numElements numSets
    /// cost element element ...
    /// ...
    /// ```
    ///
    /// with one line per set. Blank lines are skipped and any run of
    /// whitespace (including `\r`) separates tokens. Errors about a set carry
    /// the physical line it was read from.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Problem, InstanceError> {
        let mut instance: Option<(Problem, usize)> = None;
        let mut extra = 0;
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let lineno = i + 1;
            let mut tokens = line.split_whitespace();
            let Some(first) = tokens.next() else { continue }; // blank line
            match instance {
                None => { // header
                    let num_elements = parse_token::<usize>(first, lineno)?;
                    let num_sets = match tokens.next() {
                        Some(token) => parse_token::<usize>(token, lineno)?,
                        None => return Err(InstanceError::MissingHeader),
                    };
                    if let Some(token) = tokens.next() {
                        return Err(InstanceError::InvalidToken { line: lineno, token: token.to_string() });
                    }
                    instance = Some((Problem::new(num_elements).map_err(at_line(lineno))?, num_sets));
                }
                Some((ref mut problem, num_sets)) => {
                    if problem.num_sets() == num_sets {
                        extra += 1;
                        continue;
                    }
                    let cost = parse_token::<f64>(first, lineno)?;
                    let elements = tokens.map(|t| parse_token::<usize>(t, lineno)).collect::<Result<Vec<_>, _>>()?;
                    problem.add_set(cost, &elements).map_err(at_line(lineno))?;
                }
            }
        }
        match instance {
            Some((problem, num_sets)) if problem.num_sets() == num_sets && extra == 0 => Ok(problem),
            Some((problem, num_sets)) => Err(InstanceError::SetCountMismatch { expected: num_sets, found: problem.num_sets() + extra }),
            None => Err(InstanceError::MissingHeader),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Problem, InstanceError> {
        Problem::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn from_stdin() -> Result<Problem, InstanceError> {
        Problem::from_reader(std::io::stdin().lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Problem, InstanceError> {
        Problem::from_reader(text.as_bytes())
    }

    #[test]
    fn reads_sets_in_order() {
        let p = parse("3 2\n2 0 1\n3.5 1 2\n").unwrap();
        assert_eq!(p.num_elements(), 3);
        assert_eq!(p.num_sets(), 2);
        assert_eq!(p.set(0).cost(), 2.0);
        assert_eq!(p.set(1).cost(), 3.5);
        assert_eq!(p.elements(0).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(p.elements(1).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(p.occurrences().for_element(1).len(), 2);
    }

    #[test]
    fn tolerates_crlf_extra_spaces_and_missing_final_newline() {
        let p = parse("2 2\r\n1   0 \r\n\r\n 4 1  0").unwrap();
        assert_eq!(p.num_sets(), 2);
        assert_eq!(p.elements(1).collect::<Vec<_>>(), vec![1, 0]);
        assert_eq!(p.set(1).cost(), 4.0);
    }

    #[test]
    fn set_without_elements_is_empty() {
        let p = parse("1 2\n7\n1 0\n").unwrap();
        assert_eq!(p.set(0).size(), 0);
        assert_eq!(p.set(0).efficiency(), None);
        assert_eq!(p.best(), Some(1));
    }

    #[test]
    fn missing_header() {
        assert!(matches!(parse(""), Err(InstanceError::MissingHeader)));
        assert!(matches!(parse("\n\n"), Err(InstanceError::MissingHeader)));
        assert!(matches!(parse("5\n1 0\n"), Err(InstanceError::MissingHeader)));
    }

    #[test]
    fn bad_tokens_report_their_line() {
        match parse("2 1\n1 0 x\n") {
            Err(InstanceError::InvalidToken { line, token }) => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(parse("2 1\n1 -1\n"), Err(InstanceError::InvalidToken { line: 2, .. })));
        assert!(matches!(parse("two 1\n"), Err(InstanceError::InvalidToken { line: 1, .. })));
    }

    fn line_and_cause(result: Result<Problem, InstanceError>) -> (usize, InstanceError) {
        match result {
            Err(InstanceError::AtLine { line, source }) => (line, *source),
            other => panic!("expected a line-tagged error, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_element_and_negative_cost() {
        let (line, cause) = line_and_cause(parse("2 1\n1 0 2\n"));
        assert_eq!(line, 2);
        assert!(matches!(cause, InstanceError::ElementOutOfRange { set: 0, element: 2, num_elements: 2 }));
        let (line, cause) = line_and_cause(parse("2 1\n-3 0 1\n"));
        assert_eq!(line, 2);
        assert!(matches!(cause, InstanceError::InvalidCost { set: 0, .. }));
    }

    #[test]
    fn blank_lines_do_not_shift_reported_line() {
        let err = parse("2 2\n\n1 0\n\n-1 1\n").unwrap_err();
        assert_eq!(err.to_string(), "line 5: set 1: cost -1 must be finite and non-negative");
        let (line, cause) = line_and_cause(parse("2 2\n\n1 0\n\n-1 1\n"));
        assert_eq!(line, 5);
        assert!(matches!(cause, InstanceError::InvalidCost { set: 1, .. }));
    }

    #[test]
    fn header_with_trailing_token() {
        match parse("3 2 junk\n1 0\n1 1 2\n") {
            Err(InstanceError::InvalidToken { line, token }) => {
                assert_eq!(line, 1);
                assert_eq!(token, "junk");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn huge_universe_is_an_error_not_a_panic() {
        let (line, cause) = line_and_cause(parse(&format!("{} 0\n", usize::MAX)));
        assert_eq!(line, 1);
        assert!(matches!(cause, InstanceError::TooLarge { .. }));
    }

    #[test]
    fn wrong_number_of_sets() {
        assert!(matches!(
            parse("2 3\n1 0\n1 1\n"),
            Err(InstanceError::SetCountMismatch { expected: 3, found: 2 })
        ));
        assert!(matches!(
            parse("2 1\n1 0\n1 1\n1 0 1\n"),
            Err(InstanceError::SetCountMismatch { expected: 1, found: 3 })
        ));
    }
}
