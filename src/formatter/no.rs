use crate::formatter::TestFormatter;

/// A formatter that produces no output.
///
/// `NoFormatter` keeps every default hook of [`TestFormatter`], so no banner,
/// markers or summaries are printed. Output captured from cases is still
/// replayed by the runner. This is useful when integrating nestest into
/// another system that handles its own reporting.
#[derive(Debug, Default, Clone)]
pub struct NoFormatter;

impl TestFormatter for NoFormatter {}
