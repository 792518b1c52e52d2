//! A `nom`-based parser for the supported CSS selector subset.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit1, multispace0, multispace1},
    combinator::{map, map_res, opt},
    error::{Error, ErrorKind},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded},
    IResult, Parser,
};

use super::{Combinator, ComplexSelector, Compound, Filter, Step, TypeSelector};

pub(super) fn parse_group(input: &str) -> Result<Vec<ComplexSelector>, String> {
    match separated_list1(ws(char(',')), complex).parse(input.trim()) {
        Ok(("", group)) => Ok(group),
        Ok((rest, _)) => Err(format!("unexpected input at '{rest}'")),
        Err(e) => Err(e.to_string()),
    }
}

fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: nom::error::ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_').parse(input)
}

fn complex(input: &str) -> IResult<&str, ComplexSelector> {
    let (input, first) = compound(input)?;
    let (input, rest) = many0(pair(combinator, compound)).parse(input)?;

    let mut steps = vec![Step {
        combinator: Combinator::Descendant,
        compound: first,
    }];
    steps.extend(
        rest.into_iter()
            .map(|(combinator, compound)| Step { combinator, compound }),
    );

    Ok((input, ComplexSelector { steps }))
}

fn combinator(input: &str) -> IResult<&str, Combinator> {
    alt((
        map(ws(char('>')), |_| Combinator::Child),
        map(multispace1, |_| Combinator::Descendant),
    ))
    .parse(input)
}

fn compound(input: &str) -> IResult<&str, Compound> {
    let (rest, (element, filters)) = pair(opt(type_selector), many0(filter)).parse(input)?;
    if element.is_none() && filters.is_empty() {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Verify)));
    }
    Ok((rest, Compound { element, filters }))
}

fn type_selector(input: &str) -> IResult<&str, TypeSelector> {
    alt((
        map(char('*'), |_| TypeSelector::Any),
        map(identifier, |name: &str| TypeSelector::Named(name.to_string())),
    ))
    .parse(input)
}

fn filter(input: &str) -> IResult<&str, Filter> {
    alt((
        map(preceded(char('#'), identifier), |id: &str| {
            Filter::Id(id.to_string())
        }),
        map(preceded(char('.'), identifier), |class: &str| {
            Filter::Class(class.to_string())
        }),
        map(tag(":first-child"), |_| Filter::FirstChild),
        map(tag(":last-child"), |_| Filter::LastChild),
        map(
            delimited(
                tag(":nth-child("),
                ws(map_res(digit1, str::parse::<usize>)),
                char(')'),
            ),
            Filter::NthChild,
        ),
        attribute,
    ))
    .parse(input)
}

fn attribute(input: &str) -> IResult<&str, Filter> {
    map(
        delimited(
            char('['),
            pair(
                ws(identifier),
                opt(preceded(ws(char('=')), ws(attribute_value))),
            ),
            char(']'),
        ),
        |(name, value): (&str, Option<&str>)| Filter::Attribute {
            name: name.to_string(),
            value: value.map(String::from),
        },
    )
    .parse(input)
}

fn attribute_value(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
        delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
        identifier,
    ))
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Option<TypeSelector> {
        Some(TypeSelector::Named(name.to_string()))
    }

    #[test]
    fn test_single_type() {
        let group = parse_group("td").unwrap();
        assert_eq!(group.len(), 1);
        assert_eq!(group[0].steps.len(), 1);
        assert_eq!(group[0].steps[0].compound.element, named("td"));
        assert!(group[0].steps[0].compound.filters.is_empty());
    }

    #[test]
    fn test_combinators() {
        let group = parse_group("body table#objects > tbody > tr").unwrap();
        let steps = &group[0].steps;
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[1].combinator, Combinator::Descendant);
        assert_eq!(
            steps[1].compound.filters,
            vec![Filter::Id("objects".into())]
        );
        assert_eq!(steps[2].combinator, Combinator::Child);
        assert_eq!(steps[3].combinator, Combinator::Child);
        assert_eq!(steps[3].compound.element, named("tr"));
    }

    #[test]
    fn test_child_combinator_without_spaces() {
        let group = parse_group("td>span").unwrap();
        assert_eq!(group[0].steps[1].combinator, Combinator::Child);
    }

    #[test]
    fn test_pseudo_classes() {
        let group = parse_group("td:last-child > table tr:nth-child( 2 ):first-child").unwrap();
        let steps = &group[0].steps;
        assert_eq!(steps[0].compound.filters, vec![Filter::LastChild]);
        assert_eq!(
            steps[2].compound.filters,
            vec![Filter::NthChild(2), Filter::FirstChild]
        );
    }

    #[test]
    fn test_class_and_attributes() {
        let group = parse_group(r#"*.prop[data-kind="type"][hidden][lang=en]"#).unwrap();
        let compound = &group[0].steps[0].compound;
        assert_eq!(compound.element, Some(TypeSelector::Any));
        assert_eq!(
            compound.filters,
            vec![
                Filter::Class("prop".into()),
                Filter::Attribute {
                    name: "data-kind".into(),
                    value: Some("type".into())
                },
                Filter::Attribute {
                    name: "hidden".into(),
                    value: None
                },
                Filter::Attribute {
                    name: "lang".into(),
                    value: Some("en".into())
                },
            ]
        );
    }

    #[test]
    fn test_group() {
        let group = parse_group("th , td.name").unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(group[1].steps[0].compound.element, named("td"));
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert!(parse_group("  td > span  ").is_ok());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_group("").is_err());
        assert!(parse_group("td >").is_err());
        assert!(parse_group("td ~ span").is_err());
        assert!(parse_group(":hover").is_err());
        assert!(parse_group("td,").is_err());
    }
}
