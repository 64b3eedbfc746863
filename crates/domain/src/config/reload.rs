use crate::cidr_filter::CidrFilter;
use crate::domain_set::DomainSuffixSet;
use crate::policy::Policy;
use crate::rule::Rule;

/// Result of parsing watched-source text.
///
/// `dropped` carries the `net` tokens whose CIDR failed to parse so the
/// caller can report them; the rest of the batch still loads.
#[derive(Debug, Default)]
pub struct ReloadParse {
    pub rules: Vec<Rule>,
    pub domains: DomainSuffixSet,
    pub dropped: Vec<String>,
}

/// Parse the line-oriented watched-file format.
///
/// Lines are whitespace-tokenized and independent. `net` appends a CIDR
/// policy to the single accumulated rule, `domain` adds a suffix entry
/// tagged with the batch length. Unrecognized first tokens are skipped so
/// blank and comment lines pass through. The accumulated rule is kept only
/// when it ended up with at least one policy.
pub fn parse_reload(input: &str) -> ReloadParse {
    let mut parse = ReloadParse::default();
    let mut rule = Rule::default();
    let tag = input.len().to_string();

    for line in input.lines() {
        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("net") => {
                let args: Vec<&str> = fields.collect();
                if args.is_empty() {
                    continue;
                }
                match CidrFilter::build(&args) {
                    Ok(filter) => rule.policies.push(Policy::Network(filter)),
                    Err(_) => parse.dropped.push(args.join(" ")),
                }
            }
            Some("domain") => {
                if let Some(name) = fields.next() {
                    parse.domains.insert(name, tag.clone());
                }
            }
            _ => {}
        }
    }

    if !rule.policies.is_empty() {
        parse.rules.push(rule);
    }
    parse
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tokens_are_skipped() {
        let parse = parse_reload("# comment\n\nbogus line here\nnet 10.0.0.0/8\n");

        assert_eq!(parse.rules.len(), 1);
        assert_eq!(parse.rules[0].policies.len(), 1);
        assert!(parse.dropped.is_empty());
    }

    #[test]
    fn test_malformed_cidr_drops_only_that_policy() {
        let parse = parse_reload("net 999.999.999.999/8\nnet 192.0.2.0/24\n");

        assert_eq!(parse.rules.len(), 1);
        assert_eq!(parse.rules[0].policies.len(), 1);
        assert_eq!(parse.dropped, vec!["999.999.999.999/8".to_string()]);
    }

    #[test]
    fn test_rule_without_policies_is_not_retained() {
        let parse = parse_reload("net 999.999.999.999/8\ndomain example.com\n");

        assert!(parse.rules.is_empty());
        assert_eq!(parse.domains.len(), 1);
    }

    #[test]
    fn test_domain_entries_are_tagged_with_batch_length() {
        let input = "domain example.com\n";
        let parse = parse_reload(input);

        assert_eq!(
            parse.domains.tag("example.com"),
            Some(input.len().to_string().as_str())
        );
    }
}
