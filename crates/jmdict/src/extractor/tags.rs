//! Element and attribute names of the JMdict format

/// Structural element names
pub mod tag {
  /// One dictionary entry
  pub const ENTRY: &str = "entry";
  /// Sequence number
  pub const ENT_SEQ: &str = "ent_seq";
  /// Kanji element
  pub const K_ELE: &str = "k_ele";
  /// Kanji text
  pub const KEB: &str = "keb";
  /// Reading element
  pub const R_ELE: &str = "r_ele";
  /// Reading text
  pub const REB: &str = "reb";
  /// Marks a reading that is not a true reading of the kanji
  pub const RE_NOKANJI: &str = "re_nokanji";
  /// Sense element
  pub const SENSE: &str = "sense";
  /// Loanword source
  pub const LSOURCE: &str = "lsource";
}

/// Attribute names
pub mod attribute {
  /// `lsource` wasei flag
  pub const LS_WASEI: &str = "ls_wasei";
  /// `lsource` language
  pub const XML_LANG: &str = "xml:lang";
  /// `lsource` completeness
  pub const LS_TYPE: &str = "ls_type";
}

/// Repeated text fields read by [`extract_field`](super::fields::extract_field).
///
/// This is the closed list of element names the field extractor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldTag {
  /// Kanji information code
  KeInf,
  /// Kanji priority code
  KePri,
  /// Reading restriction
  ReRestr,
  /// Reading information code
  ReInf,
  /// Reading priority code
  RePri,
  /// Sense restricted to kanji
  Stagk,
  /// Sense restricted to reading
  Stagr,
  /// Part of speech
  Pos,
  /// Cross reference
  Xref,
  /// Antonym
  Ant,
  /// Field of application
  Field,
  /// Miscellaneous code
  Misc,
  /// Sense information
  SInf,
  /// Dialect
  Dial,
  /// Gloss
  Gloss,
}

impl FieldTag {
  /// Every supported field tag
  pub const ALL: [FieldTag; 15] = [
    Self::KeInf,
    Self::KePri,
    Self::ReRestr,
    Self::ReInf,
    Self::RePri,
    Self::Stagk,
    Self::Stagr,
    Self::Pos,
    Self::Xref,
    Self::Ant,
    Self::Field,
    Self::Misc,
    Self::SInf,
    Self::Dial,
    Self::Gloss,
  ];

  /// Element name in the source document
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::KeInf => "ke_inf",
      Self::KePri => "ke_pri",
      Self::ReRestr => "re_restr",
      Self::ReInf => "re_inf",
      Self::RePri => "re_pri",
      Self::Stagk => "stagk",
      Self::Stagr => "stagr",
      Self::Pos => "pos",
      Self::Xref => "xref",
      Self::Ant => "ant",
      Self::Field => "field",
      Self::Misc => "misc",
      Self::SInf => "s_inf",
      Self::Dial => "dial",
      Self::Gloss => "gloss",
    }
  }

  /// Looks up the tag for an element name. Unknown names return `None`.
  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|tag| tag.as_str() == name)
  }
}

impl std::fmt::Display for FieldTag {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}
