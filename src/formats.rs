use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// A set of documentation output formats.
///
/// Each supported format occupies one bit. Values are combined with `|` and
/// queried with [`Formats::is_set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Formats(u8);

impl Formats {
    /// Markdown/CommonMark output.
    pub const MARKDOWN: Formats = Formats(1);
    /// Manpage (roff) output.
    pub const MAN: Formats = Formats(1 << 1);
    /// YAML output.
    pub const YAML: Formats = Formats(1 << 2);
    /// reStructuredText output.
    pub const REST: Formats = Formats(1 << 3);
    /// JSON output.
    pub const JSON: Formats = Formats(1 << 4);

    /// Generation order of the defined formats. This is not bit order.
    pub const ORDER: [Formats; 5] = [
        Formats::YAML,
        Formats::JSON,
        Formats::MARKDOWN,
        Formats::MAN,
        Formats::REST,
    ];

    /// An empty set.
    pub const fn empty() -> Self {
        Formats(0)
    }

    /// Creates a set from raw bits. Unknown bits are kept as-is.
    pub const fn from_bits(bits: u8) -> Self {
        Formats(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if any of the bits in `format` are set.
    pub fn is_set(self, format: Formats) -> bool {
        self.0 & format.0 != 0
    }

    /// Adds `format` to the set, returning the set for chaining.
    pub fn set(&mut self, format: Formats) -> &mut Self {
        self.0 |= format.0;
        self
    }

    /// Removes `format` from the set, returning the set for chaining.
    pub fn unset(&mut self, format: Formats) -> &mut Self {
        self.0 &= !format.0;
        self
    }

    /// Returns true if at least one defined format is set.
    ///
    /// Bits outside the defined formats are tolerated.
    pub fn is_valid(self) -> bool {
        Formats::ORDER.iter().any(|f| self.is_set(*f))
    }

    /// Lists the defined formats in this set, in generation order
    /// (Yaml, Json, Markdown, Man, ReST).
    pub fn enumerate(self) -> Vec<Formats> {
        Formats::ORDER
            .iter()
            .copied()
            .filter(|f| self.is_set(*f))
            .collect()
    }

    /// Parses a user-facing format name such as `md` or `yaml`.
    pub fn from_name(name: &str) -> Option<Formats> {
        match name.trim().to_lowercase().as_str() {
            "markdown" | "md" => Some(Formats::MARKDOWN),
            "yaml" | "yml" => Some(Formats::YAML),
            "json" => Some(Formats::JSON),
            "rest" | "rst" => Some(Formats::REST),
            "man" => Some(Formats::MAN),
            _ => None,
        }
    }

    /// The lower-case name used for template lookup and user selection.
    pub fn name(self) -> String {
        self.to_string().to_lowercase()
    }
}

impl BitOr for Formats {
    type Output = Formats;

    fn bitor(self, rhs: Formats) -> Formats {
        Formats(self.0 | rhs.0)
    }
}

impl BitOrAssign for Formats {
    fn bitor_assign(&mut self, rhs: Formats) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Formats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Formats::MARKDOWN => f.write_str("Markdown"),
            Formats::MAN => f.write_str("Man"),
            Formats::YAML => f.write_str("Yaml"),
            Formats::REST => f.write_str("ReST"),
            Formats::JSON => f.write_str("Json"),
            other => {
                let names: Vec<String> = other.enumerate().iter().map(|f| f.to_string()).collect();
                f.write_str(&names.join("|"))
            }
        }
    }
}
