use std::fmt;

/// The keyword on a GEDCOM line identifying its semantic kind.
///
/// Only the subset of tags this crate interprets has a dedicated variant.
/// Everything else is carried verbatim in [`Tag::Other`], so that a tree can
/// be rendered back to text without losing unknown lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    /// `HEAD`, the header record.
    Head,
    /// `TRLR`, the trailer marking the end of a document.
    Trailer,
    /// `CHAR`, the character set declaration.
    Char,
    /// `SOUR`, a source record or the producing system in the header.
    Source,
    /// `VERS`, a version number.
    Version,
    /// `DATE`
    Date,
    /// `TIME`
    Time,
    /// `INDI`, an individual record.
    Individual,
    /// `FAM`, a family record.
    Family,
    /// `NAME`
    Name,
    /// `GIVN`, the given-name part of a name.
    Given,
    /// `SURN`, the surname part of a name.
    Surname,
    /// `SEX`
    Sex,
    /// `BIRT`
    Birth,
    /// `DEAT`
    Death,
    /// `BURI`
    Burial,
    /// `ADOP`
    Adoption,
    /// `MARR`
    Marriage,
    /// `DIV`
    Divorce,
    /// `FAMS`, link from an individual to a family where they are a spouse.
    SpouseFamily,
    /// `FAMC`, link from an individual to the family they are a child of.
    ChildFamily,
    /// `HUSB`
    Husband,
    /// `WIFE`
    Wife,
    /// `CHIL`
    Child,
    /// `NOTE`
    Note,
    /// `CONT`, continuation of the previous value on a new line.
    Continued,
    /// `CONC`, concatenation onto the previous value.
    Concatenated,
    /// `REPO`, a repository record.
    Repository,
    /// `OBJE`, a multimedia object record.
    Object,
    /// `PLAC`
    Place,
    /// `CITN`, a citation record.
    Citation,
    /// `AGE`
    Age,
    /// `ADDR`
    Address,
    /// `AUTH`
    Author,
    /// `PUBL`
    Publication,
    /// `TITL`
    Title,
    /// `FILE`
    File,
    /// `FONE`, a phonetic variation.
    Phonetic,
    /// `PAGE`
    Page,
    /// `TEXT`
    Text,
    /// Any tag without a dedicated variant, kept verbatim.
    Other(String),
}

impl Tag {
    /// Classifies a raw tag keyword.
    #[must_use]
    pub fn new(keyword: &str) -> Self {
        match keyword {
            "HEAD" => Self::Head,
            "TRLR" => Self::Trailer,
            "CHAR" => Self::Char,
            "SOUR" => Self::Source,
            "VERS" => Self::Version,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "INDI" => Self::Individual,
            "FAM" => Self::Family,
            "NAME" => Self::Name,
            "GIVN" => Self::Given,
            "SURN" => Self::Surname,
            "SEX" => Self::Sex,
            "BIRT" => Self::Birth,
            "DEAT" => Self::Death,
            "BURI" => Self::Burial,
            "ADOP" => Self::Adoption,
            "MARR" => Self::Marriage,
            "DIV" => Self::Divorce,
            "FAMS" => Self::SpouseFamily,
            "FAMC" => Self::ChildFamily,
            "HUSB" => Self::Husband,
            "WIFE" => Self::Wife,
            "CHIL" => Self::Child,
            "NOTE" => Self::Note,
            "CONT" => Self::Continued,
            "CONC" => Self::Concatenated,
            "REPO" => Self::Repository,
            "OBJE" => Self::Object,
            "PLAC" => Self::Place,
            "CITN" => Self::Citation,
            "AGE" => Self::Age,
            "ADDR" => Self::Address,
            "AUTH" => Self::Author,
            "PUBL" => Self::Publication,
            "TITL" => Self::Title,
            "FILE" => Self::File,
            "FONE" => Self::Phonetic,
            "PAGE" => Self::Page,
            "TEXT" => Self::Text,
            other => Self::Other(other.to_string()),
        }
    }

    /// The keyword as written in GEDCOM text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Head => "HEAD",
            Self::Trailer => "TRLR",
            Self::Char => "CHAR",
            Self::Source => "SOUR",
            Self::Version => "VERS",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Individual => "INDI",
            Self::Family => "FAM",
            Self::Name => "NAME",
            Self::Given => "GIVN",
            Self::Surname => "SURN",
            Self::Sex => "SEX",
            Self::Birth => "BIRT",
            Self::Death => "DEAT",
            Self::Burial => "BURI",
            Self::Adoption => "ADOP",
            Self::Marriage => "MARR",
            Self::Divorce => "DIV",
            Self::SpouseFamily => "FAMS",
            Self::ChildFamily => "FAMC",
            Self::Husband => "HUSB",
            Self::Wife => "WIFE",
            Self::Child => "CHIL",
            Self::Note => "NOTE",
            Self::Continued => "CONT",
            Self::Concatenated => "CONC",
            Self::Repository => "REPO",
            Self::Object => "OBJE",
            Self::Place => "PLAC",
            Self::Citation => "CITN",
            Self::Age => "AGE",
            Self::Address => "ADDR",
            Self::Author => "AUTH",
            Self::Publication => "PUBL",
            Self::Title => "TITL",
            Self::File => "FILE",
            Self::Phonetic => "FONE",
            Self::Page => "PAGE",
            Self::Text => "TEXT",
            Self::Other(keyword) => keyword,
        }
    }

    /// Whether the tag names a member of a family (`HUSB`, `WIFE`, `CHIL`).
    ///
    /// These lines always reference an individual, so their pointer is
    /// written after the tag.
    #[must_use]
    pub const fn is_family_role(&self) -> bool {
        matches!(self, Self::Husband | Self::Wife | Self::Child)
    }
}

impl From<&str> for Tag {
    fn from(keyword: &str) -> Self {
        Self::new(keyword)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
