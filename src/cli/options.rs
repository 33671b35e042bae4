// src/cli/options.rs

/// Every option the tool knows about: the content sections plus the two
/// control slots (positional input file and `-O` output directory).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionId {
    InputFileName,
    Errors,
    Warnings,
    Options,
    Commandline,
    Analyses,
    InfoCard,
    Timings,
    Summary,
    Version,
    OutputFileName,
}

/// Character every flag token starts with.
pub const FLAG_PREFIX: char = '-';

impl OptionId {
    pub const COUNT: usize = 11;

    pub const ALL: [OptionId; Self::COUNT] = [
        OptionId::InputFileName,
        OptionId::Errors,
        OptionId::Warnings,
        OptionId::Options,
        OptionId::Commandline,
        OptionId::Analyses,
        OptionId::InfoCard,
        OptionId::Timings,
        OptionId::Summary,
        OptionId::Version,
        OptionId::OutputFileName,
    ];

    /// Order sections are printed in when reporting to the console.
    /// The control options never appear here.
    pub const OUTPUT_ORDER: [OptionId; 9] = [
        OptionId::Version,
        OptionId::InfoCard,
        OptionId::Commandline,
        OptionId::Options,
        OptionId::Analyses,
        OptionId::Summary,
        OptionId::Errors,
        OptionId::Warnings,
        OptionId::Timings,
    ];

    /// Short flag letter, `None` for the positional input file.
    pub const fn short(self) -> Option<char> {
        match self {
            OptionId::InputFileName => None,
            OptionId::Errors => Some('e'),
            OptionId::Warnings => Some('w'),
            OptionId::Options => Some('o'),
            OptionId::Commandline => Some('c'),
            OptionId::Analyses => Some('a'),
            OptionId::InfoCard => Some('i'),
            OptionId::Timings => Some('t'),
            OptionId::Summary => Some('s'),
            OptionId::Version => Some('v'),
            OptionId::OutputFileName => Some('O'),
        }
    }

    /// Name used for banners and for `<DisplayName>.txt` in file mode.
    pub const fn display_name(self) -> &'static str {
        match self {
            OptionId::InputFileName => "inputFileName",
            OptionId::Errors => "Errors",
            OptionId::Warnings => "Warnings",
            OptionId::Options => "Options",
            OptionId::Commandline => "Commandline",
            OptionId::Analyses => "Analyses",
            OptionId::InfoCard => "InfoCard",
            OptionId::Timings => "Timings",
            OptionId::Summary => "Summary",
            OptionId::Version => "Version",
            OptionId::OutputFileName => "OutputFileName",
        }
    }

    pub const fn accepts_argument(self) -> bool {
        matches!(self, OptionId::OutputFileName)
    }

    pub const fn help(self) -> &'static str {
        match self {
            OptionId::InputFileName => "Simulation log file to read",
            OptionId::Errors => "Extract the SIM_ERROR blocks",
            OptionId::Warnings => "Extract the SIM_WARNING blocks",
            OptionId::Options => "Extract the options used/ignored listings",
            OptionId::Commandline => "Extract the command-line options used",
            OptionId::Analyses => "Extract the analyses section",
            OptionId::InfoCard => "Extract the developer info card",
            OptionId::Timings => "Extract the timings section",
            OptionId::Summary => "Extract the simulation summary",
            OptionId::Version => "Print the tool version banner and nothing else",
            OptionId::OutputFileName => "Write each section to <DIR>/<Section>.txt instead of the console",
        }
    }

    pub fn from_display_name(name: &str) -> Option<OptionId> {
        Self::ALL.into_iter().find(|id| id.display_name() == name)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Per-option state: the fixed description plus what the command line set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub id: OptionId,
    requested: bool,
    argument: String,
}

impl OptionEntry {
    fn new(id: OptionId) -> Self {
        Self { id, requested: false, argument: String::new() }
    }

    /// Flag token as typed on the command line, e.g. `-e`.
    pub fn flag(&self) -> Option<String> {
        self.id.short().map(|c| format!("{}{}", FLAG_PREFIX, c))
    }

    pub fn argument(&self) -> &str {
        &self.argument
    }
}

/// Option state for one invocation, keyed by [`OptionId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRegistry {
    entries: [OptionEntry; OptionId::COUNT],
}

impl Default for OptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionRegistry {
    pub fn new() -> Self {
        Self {
            entries: std::array::from_fn(|i| OptionEntry::new(OptionId::ALL[i])),
        }
    }

    pub fn entry(&self, id: OptionId) -> &OptionEntry {
        &self.entries[id.index()]
    }

    pub fn entries(&self) -> impl Iterator<Item = &OptionEntry> {
        self.entries.iter()
    }

    pub fn is_requested(&self, id: OptionId) -> bool {
        self.entry(id).requested
    }

    pub fn argument_value(&self, id: OptionId) -> &str {
        self.entry(id).argument()
    }

    /// Requested only ever goes false -> true.
    pub fn mark_requested(&mut self, id: OptionId) {
        self.entries[id.index()].requested = true;
    }

    pub fn set_argument(&mut self, id: OptionId, value: impl Into<String>) {
        self.entries[id.index()].argument = value.into();
    }

    pub fn output_order(&self) -> &'static [OptionId] {
        &OptionId::OUTPUT_ORDER
    }

    /// Resolves a flag token to its option. Only exact matches count,
    /// so `-ew` or `-e=x` resolve to nothing.
    pub fn find_by_flag(&self, token: &str) -> Option<OptionId> {
        self.entries
            .iter()
            .find(|entry| entry.flag().as_deref() == Some(token))
            .map(|entry| entry.id)
    }
}
