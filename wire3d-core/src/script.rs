/// Parser for input scripts that replay interaction headlessly
///
/// One command per line; `#` starts a comment:
///
/// ```text
/// mode r          # a mode key (o n p r t s v) or name (rotate, scale, ...)
/// move 100        # absolute pointer x, optional y
/// down left       # left | middle | right
/// move 110 20
/// up left
/// tick            # build one frame
/// ```
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, space0, space1},
    combinator::{all_consuming, map_opt, opt, value, verify},
    number::complete::double,
    sequence::{preceded, terminated},
    IResult,
};

use crate::error::{Error, Result};
use crate::interaction::{Button, InputEvent, Mode};

/// One line of a script
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptCommand {
    /// Deliver an input event
    Event(InputEvent),
    /// Run one frame
    Tick,
}

/// Parse a whole script, reporting the first bad line
pub fn parse_script(input: &str) -> Result<Vec<ScriptCommand>> {
    let mut commands = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        match all_consuming(terminated(parse_command, space0))(line) {
            Ok((_, command)) => commands.push(command),
            Err(_) => {
                return Err(Error::script(index + 1, format!("unrecognised command `{}`", line)));
            }
        }
    }

    Ok(commands)
}

fn parse_command(input: &str) -> IResult<&str, ScriptCommand> {
    alt((parse_mode, parse_button, parse_move, value(ScriptCommand::Tick, tag("tick"))))(input)
}

fn parse_mode(input: &str) -> IResult<&str, ScriptCommand> {
    let (input, mode) = preceded(terminated(tag("mode"), space1), map_opt(alpha1, mode_from_word))(input)?;
    Ok((input, ScriptCommand::Event(InputEvent::SelectMode(mode))))
}

fn mode_from_word(word: &str) -> Option<Mode> {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(key), None) => Mode::from_key(key),
        _ => Mode::from_name(&word.to_ascii_lowercase()),
    }
}

fn parse_button(input: &str) -> IResult<&str, ScriptCommand> {
    let (input, pressed) = alt((value(true, tag("down")), value(false, tag("up"))))(input)?;
    let (input, _) = space1(input)?;
    let (input, button) = map_opt(alpha1, Button::from_name)(input)?;

    let event = if pressed {
        InputEvent::ButtonDown(button)
    } else {
        InputEvent::ButtonUp(button)
    };
    Ok((input, ScriptCommand::Event(event)))
}

fn parse_move(input: &str) -> IResult<&str, ScriptCommand> {
    let (input, _) = terminated(tag("move"), space1)(input)?;
    let (input, x) = coordinate(input)?;
    let (input, y) = opt(preceded(space1, coordinate))(input)?;

    Ok((
        input,
        ScriptCommand::Event(InputEvent::PointerMoved { x, y: y.unwrap_or(0.0) }),
    ))
}

/// `double` also accepts `nan` and `inf`, which would poison the matrices
fn coordinate(input: &str) -> IResult<&str, f64> {
    verify(double, |v: &f64| v.is_finite())(input)
}
