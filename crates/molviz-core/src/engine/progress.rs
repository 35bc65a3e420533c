/// Stages of a lookup, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Translating,
    ResolvingCompound,
    FetchingStructure,
    ParsingStructure,
    BuildingGeometry,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Translating => "Translating",
            Self::ResolvingCompound => "Resolving compound",
            Self::FetchingStructure => "Fetching structure",
            Self::ParsingStructure => "Parsing structure",
            Self::BuildingGeometry => "Building geometry",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart(Phase),
    PhaseFinish(Phase),

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    pub fn start(&self, phase: Phase) {
        self.report(Progress::PhaseStart(phase));
    }

    pub fn finish(&self, phase: Phase) {
        self.report(Progress::PhaseFinish(phase));
    }

    pub fn message(&self, text: impl Into<String>) {
        self.report(Progress::Message(text.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn silent_reporter_ignores_events() {
        ProgressReporter::new().start(Phase::Translating);
    }

    #[test]
    fn callback_sees_events_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            sink.lock().unwrap().push(event);
        }));

        reporter.start(Phase::ParsingStructure);
        reporter.message("3 atoms");
        reporter.finish(Phase::ParsingStructure);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                Progress::PhaseStart(Phase::ParsingStructure),
                Progress::Message("3 atoms".to_string()),
                Progress::PhaseFinish(Phase::ParsingStructure),
            ]
        );
    }

    #[test]
    fn labels_are_human_readable() {
        assert_eq!(Phase::ResolvingCompound.label(), "Resolving compound");
        assert_eq!(Phase::BuildingGeometry.label(), "Building geometry");
    }
}
