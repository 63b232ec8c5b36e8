//! Token classification for marble notation characters

/// Color identity of a message marble.
///
/// The palette is finite: letters past `t` wrap around onto earlier colors
/// (`z` shares blue with `a`, `y` shares green with `b`, and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarbleColor {
    Blue,
    Green,
    Purple,
    Orange,
    Red,
    Yellow,
    Teal,
    Pink,
    Indigo,
    Cyan,
    Lime,
    Amber,
    Emerald,
    Rose,
    Violet,
    Sky,
    Stone,
    Slate,
    Zinc,
    Neutral,
}

impl MarbleColor {
    /// Every palette entry, in stylesheet order
    pub const ALL: [MarbleColor; 20] = [
        MarbleColor::Blue,
        MarbleColor::Green,
        MarbleColor::Purple,
        MarbleColor::Orange,
        MarbleColor::Red,
        MarbleColor::Yellow,
        MarbleColor::Teal,
        MarbleColor::Pink,
        MarbleColor::Indigo,
        MarbleColor::Cyan,
        MarbleColor::Lime,
        MarbleColor::Amber,
        MarbleColor::Emerald,
        MarbleColor::Rose,
        MarbleColor::Violet,
        MarbleColor::Sky,
        MarbleColor::Stone,
        MarbleColor::Slate,
        MarbleColor::Zinc,
        MarbleColor::Neutral,
    ];

    /// Look up the color for a lowercase message identifier
    pub fn for_message(id: char) -> Option<MarbleColor> {
        let color = match id {
            'a' | 'z' => MarbleColor::Blue,
            'b' | 'y' => MarbleColor::Green,
            'c' => MarbleColor::Purple,
            'd' | 'w' => MarbleColor::Orange,
            'e' | 'v' => MarbleColor::Red,
            'f' | 'x' => MarbleColor::Yellow,
            'g' => MarbleColor::Teal,
            'h' => MarbleColor::Pink,
            'i' => MarbleColor::Indigo,
            'j' => MarbleColor::Cyan,
            'k' => MarbleColor::Lime,
            'l' => MarbleColor::Amber,
            'm' => MarbleColor::Emerald,
            'n' => MarbleColor::Rose,
            'o' => MarbleColor::Violet,
            'p' => MarbleColor::Sky,
            'q' | 'u' => MarbleColor::Stone,
            'r' => MarbleColor::Slate,
            's' => MarbleColor::Zinc,
            't' => MarbleColor::Neutral,
            _ => return None,
        };
        Some(color)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarbleColor::Blue => "blue",
            MarbleColor::Green => "green",
            MarbleColor::Purple => "purple",
            MarbleColor::Orange => "orange",
            MarbleColor::Red => "red",
            MarbleColor::Yellow => "yellow",
            MarbleColor::Teal => "teal",
            MarbleColor::Pink => "pink",
            MarbleColor::Indigo => "indigo",
            MarbleColor::Cyan => "cyan",
            MarbleColor::Lime => "lime",
            MarbleColor::Amber => "amber",
            MarbleColor::Emerald => "emerald",
            MarbleColor::Rose => "rose",
            MarbleColor::Violet => "violet",
            MarbleColor::Sky => "sky",
            MarbleColor::Stone => "stone",
            MarbleColor::Slate => "slate",
            MarbleColor::Zinc => "zinc",
            MarbleColor::Neutral => "neutral",
        }
    }

    /// CSS class used for marbles of this color
    pub fn class(&self) -> String {
        format!("marble-{}", self.as_str())
    }
}

/// Domain events drawn as diamonds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialEvent {
    /// Consumer group rebalance (`R`)
    Rebalance,
    /// Log compaction (`C`)
    Compaction,
    /// Consumer lag (`L`)
    Lag,
}

impl SpecialEvent {
    pub fn symbol(&self) -> char {
        match self {
            SpecialEvent::Rebalance => 'R',
            SpecialEvent::Compaction => 'C',
            SpecialEvent::Lag => 'L',
        }
    }
}

/// One classified notation character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// `-`: advances time, draws nothing
    TimeStep,
    /// `a`..`z`
    Message { id: char, color: MarbleColor },
    /// `R`, `C`, `L`
    Special(SpecialEvent),
    /// `X`
    Error,
    /// `|`
    Completion,
}

impl Token {
    /// The character this token was classified from
    pub fn symbol(&self) -> char {
        match self {
            Token::TimeStep => '-',
            Token::Message { id, .. } => *id,
            Token::Special(event) => event.symbol(),
            Token::Error => 'X',
            Token::Completion => '|',
        }
    }

    /// Whether the token produces a marble
    pub fn is_visible(&self) -> bool {
        !matches!(self, Token::TimeStep)
    }
}

/// Classify a single notation character.
///
/// Returns `None` for characters outside the notation alphabet; those are
/// inert and neither draw nor consume a frame.
pub fn classify(c: char) -> Option<Token> {
    match c {
        '-' => Some(Token::TimeStep),
        '|' => Some(Token::Completion),
        'X' => Some(Token::Error),
        'R' => Some(Token::Special(SpecialEvent::Rebalance)),
        'C' => Some(Token::Special(SpecialEvent::Compaction)),
        'L' => Some(Token::Special(SpecialEvent::Lag)),
        _ => MarbleColor::for_message(c).map(|color| Token::Message { id: c, color }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_lowercase_letter_is_a_message() {
        for c in 'a'..='z' {
            match classify(c) {
                Some(Token::Message { id, .. }) => assert_eq!(id, c),
                other => panic!("Expected Message for {c}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_palette_wraps_around() {
        assert_eq!(MarbleColor::for_message('a'), MarbleColor::for_message('z'));
        assert_eq!(MarbleColor::for_message('b'), MarbleColor::for_message('y'));
        assert_eq!(MarbleColor::for_message('q'), MarbleColor::for_message('u'));
        assert_ne!(MarbleColor::for_message('a'), MarbleColor::for_message('b'));
    }

    #[test]
    fn test_special_and_structural_characters() {
        assert_eq!(classify('-'), Some(Token::TimeStep));
        assert_eq!(classify('|'), Some(Token::Completion));
        assert_eq!(classify('X'), Some(Token::Error));
        assert_eq!(classify('R'), Some(Token::Special(SpecialEvent::Rebalance)));
        assert_eq!(classify('C'), Some(Token::Special(SpecialEvent::Compaction)));
        assert_eq!(classify('L'), Some(Token::Special(SpecialEvent::Lag)));
    }

    #[test]
    fn test_unknown_characters_are_inert() {
        for c in [' ', 'A', 'Z', '0', '#', '^', 'é'] {
            assert_eq!(classify(c), None, "{c:?} should be inert");
        }
    }

    #[test]
    fn test_token_symbol_round_trips_character() {
        for c in "abcxyz-|XRCL".chars() {
            let token = classify(c).unwrap();
            assert_eq!(token.symbol(), c);
        }
        assert!(!Token::TimeStep.is_visible());
        assert!(Token::Completion.is_visible());
    }

    #[test]
    fn test_color_class_names() {
        assert_eq!(MarbleColor::Blue.class(), "marble-blue");
        assert_eq!(MarbleColor::Neutral.class(), "marble-neutral");
        assert_eq!(MarbleColor::ALL.len(), 20);
    }
}
