//! Chord symbol parsing and the chromatic lookup table
//!
//! A chord symbol is split into its root (letter plus optional accidental) and a
//! suffix (quality, extension, bass note...). Only the root ever moves.

/// The twelve pitch classes, spelled with sharps only.
///
/// Transposition is an index rotation through this table, always modulo 12.
pub const CHROMATIC_SCALE: [&str; 12] = [
    "A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#",
];

/// Position of a key or chord root in [`CHROMATIC_SCALE`].
///
/// Lookup is verbatim: flat spellings such as `Bb` are not normalized and
/// return `None`.
pub fn scale_index(name: &str) -> Option<usize> {
    CHROMATIC_SCALE.iter().position(|&n| n == name)
}

/// A chord symbol split into root and suffix, borrowing from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordToken<'a> {
    /// Root letter plus optional `#` or `b`, e.g. `"F#"`.
    pub root: &'a str,
    /// Everything after the root, copied through unchanged, e.g. `"m7"`.
    pub suffix: &'a str,
}

impl<'a> ChordToken<'a> {
    /// Split a chord symbol like `"C#m7"` into `("C#", "m7")`.
    ///
    /// Returns `None` when the symbol does not start with a letter A-G.
    ///
    /// # Examples
    /// ```
    /// use praise::ChordToken;
    ///
    /// let token = ChordToken::parse("Bbmaj7").unwrap();
    /// assert_eq!(token.root, "Bb");
    /// assert_eq!(token.suffix, "maj7");
    ///
    /// assert!(ChordToken::parse("x7").is_none());
    /// ```
    pub fn parse(symbol: &'a str) -> Option<Self> {
        let mut chars = symbol.char_indices();
        let (_, letter) = chars.next()?;
        if !matches!(letter, 'A'..='G') {
            return None;
        }

        // Root letters are ASCII, so byte offsets are safe here
        let root_len = match symbol.as_bytes().get(1) {
            Some(b'#') | Some(b'b') => 2,
            _ => 1,
        };

        Some(Self {
            root: &symbol[..root_len],
            suffix: &symbol[root_len..],
        })
    }

    /// Shift the root by `steps` semitones.
    ///
    /// Returns `None` when the root is not in [`CHROMATIC_SCALE`] verbatim.
    pub fn transpose(&self, steps: i32) -> Option<String> {
        let index = scale_index(self.root)?;
        let shifted = (index as i32 + steps).rem_euclid(CHROMATIC_SCALE.len() as i32) as usize;
        Some(format!("{}{}", CHROMATIC_SCALE[shifted], self.suffix))
    }
}

/// Transpose a single chord symbol, returning it unchanged when it cannot be read.
///
/// # Examples
/// ```
/// use praise::transpose_chord;
///
/// assert_eq!(transpose_chord("Am7", 3), "Cm7");
/// assert_eq!(transpose_chord("G#", 1), "A");
/// assert_eq!(transpose_chord("C", -1), "B");
///
/// // Flat roots are not in the lookup table and pass through
/// assert_eq!(transpose_chord("Bb", 2), "Bb");
/// ```
pub fn transpose_chord(chord: &str, steps: i32) -> String {
    ChordToken::parse(chord)
        .and_then(|token| token.transpose(steps))
        .unwrap_or_else(|| chord.to_string())
}
