use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{digit1, multispace1, none_of},
    combinator::{cut, eof, map, map_res, opt, peek, recognize, value},
    multi::{many1, separated_list1},
    sequence::{preceded, terminated},
    IResult,
};

/*
    NEW [<values...>] : Replace the queue, first value at the front.
    ENQUEUE <values...> : Enqueue each value in order.
    DEQUEUE : Remove and get the front value.
    COUNT : Number of queued values.
    EMPTY : Whether the queue is empty.
    AT <position> : Value at a position, 0 being the front.
    FRONT : Value at the front without removing it.
    LIST : Every value, front to back.
 */
#[derive(Debug, PartialEq, Clone)]
pub enum QueueCommand<'a> {
    New(Vec<&'a str>),
    Enqueue(Vec<&'a str>),
    Dequeue,
    Count,
    Empty,
    At(usize),
    Front,
    List,
    Unknown(&'a str),
}

pub fn parse_command(input: &str) -> IResult<&str, QueueCommand<'_>> {
    alt((
        parse_new_command,
        parse_enqueue_command,
        value(QueueCommand::Dequeue, keyword("DEQUEUE")),
        value(QueueCommand::Count, keyword("COUNT")),
        value(QueueCommand::Empty, keyword("EMPTY")),
        parse_at_command,
        value(QueueCommand::Front, keyword("FRONT")),
        value(QueueCommand::List, keyword("LIST")),
        parse_unknown_command,
    ))(input)
}

fn parse_new_command(input: &str) -> IResult<&str, QueueCommand<'_>> {
    let (input, _) = keyword("NEW")(input)?;
    let (input, values) = opt(preceded(multispace1, parse_token_list))(input)?;
    Ok((input, QueueCommand::New(values.unwrap_or_default())))
}

fn parse_enqueue_command(input: &str) -> IResult<&str, QueueCommand<'_>> {
    let (input, _) = keyword("ENQUEUE")(input)?;
    let (input, values) = cut(preceded(multispace1, parse_token_list))(input)?;
    Ok((input, QueueCommand::Enqueue(values)))
}

fn parse_at_command(input: &str) -> IResult<&str, QueueCommand<'_>> {
    let (input, _) = keyword("AT")(input)?;
    let (input, position) = cut(preceded(multispace1, parse_position))(input)?;
    Ok((input, QueueCommand::At(position)))
}

fn parse_unknown_command(input: &str) -> IResult<&str, QueueCommand<'_>> {
    map(parse_token, QueueCommand::Unknown)(input)
}

// Matches `word` only when it is a whole token.
fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    terminated(tag(word), peek(alt((multispace1, eof))))
}

fn parse_token(input: &str) -> IResult<&str, &str> {
    recognize(many1(none_of(" \t\r\n")))(input)
}

fn parse_token_list(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(multispace1, parse_token)(input)
}

fn parse_position(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}
