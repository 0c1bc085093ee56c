use anyhow::Context;
use std::convert::TryFrom;

/// Requests understood on the wire:
///
///   Pn - Request floor n (as if the panel button for n was pressed)
///   S  - Read the current state of the car
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Floor(i64),
    State,
}

impl TryFrom<&[u8]> for Request {
    type Error = anyhow::Error;

    fn try_from(value: &[u8]) -> anyhow::Result<Self> {
        let value = value.trim_ascii();
        let Some((&cmd, arg)) = value.split_first() else {
            anyhow::bail!("empty request");
        };

        match cmd {
            b'P' => {
                let num_str = std::str::from_utf8(arg).context("argument is not valid UTF-8")?;
                let floor = num_str
                    .parse::<i64>()
                    .with_context(|| format!("failed to parse '{num_str}' as a floor"))?;
                Ok(Request::Floor(floor))
            }
            b'S' if arg.is_empty() => Ok(Request::State),
            b'S' => anyhow::bail!("state request takes no argument"),
            other => anyhow::bail!("unknown request byte: {}", other),
        }
    }
}
