use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The ten step kinds. The tag strings are the catalog wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Title,
    Text,
    TextInput,
    NumberInput,
    Calculus,
    Display,
    TextFileInput,
    CsvFileInput,
    Output,
    End,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("unknown step type '{0}'")]
pub struct UnknownStepTag(pub String);

impl StepKind {
    pub const ALL: [StepKind; 10] = [
        StepKind::Title,
        StepKind::Text,
        StepKind::TextInput,
        StepKind::NumberInput,
        StepKind::Calculus,
        StepKind::Display,
        StepKind::TextFileInput,
        StepKind::CsvFileInput,
        StepKind::Output,
        StepKind::End,
    ];

    /// Return the stable tag used in the catalog file.
    pub fn tag(&self) -> &'static str {
        match self {
            StepKind::Title => "TitleStep",
            StepKind::Text => "TextStep",
            StepKind::TextInput => "TextInputStep",
            StepKind::NumberInput => "NumberInputStep",
            StepKind::Calculus => "CalculusStep",
            StepKind::Display => "DisplayStep",
            StepKind::TextFileInput => "TextFileInputStep",
            StepKind::CsvFileInput => "CSVFileInputStep",
            StepKind::Output => "OutputStep",
            StepKind::End => "EndStep",
        }
    }

    /// Key the builder menu uses for this kind (`0` is End).
    pub fn menu_key(&self) -> char {
        match self {
            StepKind::Title => '1',
            StepKind::Text => '2',
            StepKind::TextInput => '3',
            StepKind::NumberInput => '4',
            StepKind::Calculus => '5',
            StepKind::Display => '6',
            StepKind::TextFileInput => '7',
            StepKind::CsvFileInput => '8',
            StepKind::Output => '9',
            StepKind::End => '0',
        }
    }

    pub fn from_menu_key(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.menu_key() == key)
    }

    /// One-line help shown by the builder.
    pub fn summary(&self) -> &'static str {
        match self {
            StepKind::Title => "Step with a title and subtitle.",
            StepKind::Text => "Step with a title and text.",
            StepKind::TextInput => "Step which allows the user to input a title and text.",
            StepKind::NumberInput => "Step to input a number.",
            StepKind::Calculus => "Step to perform arithmetic operations.",
            StepKind::Display => "Step which displays the input for each of the steps until now.",
            StepKind::TextFileInput => "Step which lets the user input a .txt file.",
            StepKind::CsvFileInput => "Step which lets the user input a .csv file.",
            StepKind::Output => {
                "Step which lets the user output a .txt file with the information they choose."
            }
            StepKind::End => "Step which closes the flow and resets it for the next run.",
        }
    }

    /// Whether builder creation asks for a creator description.
    pub fn takes_description(&self) -> bool {
        matches!(
            self,
            StepKind::TextInput
                | StepKind::NumberInput
                | StepKind::TextFileInput
                | StepKind::CsvFileInput
        )
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for StepKind {
    type Err = UnknownStepTag;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| UnknownStepTag(tag.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_back_to_their_kind() {
        for kind in StepKind::ALL {
            assert_eq!(kind.tag().parse::<StepKind>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.tag());
        }
    }

    #[test]
    fn unknown_and_differently_cased_tags_are_rejected() {
        assert_eq!(
            "CsvFileInputStep".parse::<StepKind>(),
            Err(UnknownStepTag("CsvFileInputStep".to_string()))
        );
        assert!("".parse::<StepKind>().is_err());
        assert!(" TitleStep".parse::<StepKind>().is_err());
    }

    #[test]
    fn menu_keys_cover_digits_zero_to_nine() {
        let mut keys: Vec<char> = StepKind::ALL.iter().map(StepKind::menu_key).collect();
        keys.sort_unstable();
        assert_eq!(keys, "0123456789".chars().collect::<Vec<_>>());
        assert_eq!(StepKind::from_menu_key('0'), Some(StepKind::End));
        assert_eq!(StepKind::from_menu_key('x'), None);
    }
}
