//! Section source whose runs are resolved by the test.

use listflow::error::LoadError;
use listflow::loading::{LoadingIntent, PipelineSink, SectionSource, SectionUpdate, Subscription};
use parking_lot::Mutex;

/// One started pipeline run.
pub struct Run {
    pub intent: LoadingIntent,
    sink: Option<PipelineSink<String>>,
}

/// Records every started run and lets the test push its events.
#[derive(Default)]
pub struct ScriptedSource {
    runs: Mutex<Vec<Run>>,
}

impl ScriptedSource {
    /// Intents of all runs started so far, in order.
    pub fn started(&self) -> Vec<LoadingIntent> {
        self.runs.lock().iter().map(|r| r.intent).collect()
    }

    pub fn run_count(&self) -> usize {
        self.runs.lock().len()
    }

    pub fn latest_run(&self) -> usize {
        self.run_count().checked_sub(1).expect("no run started")
    }

    pub fn emit(&self, run: usize, update: SectionUpdate<String>) {
        let runs = self.runs.lock();
        runs[run].sink.as_ref().expect("run already finished").emit(update);
    }

    pub fn complete(&self, run: usize) {
        let sink = self.runs.lock()[run].sink.take().expect("run already finished");
        sink.complete();
    }

    pub fn fail(&self, run: usize, error: LoadError) {
        let sink = self.runs.lock()[run].sink.take().expect("run already finished");
        sink.fail(error);
    }
}

impl SectionSource<String> for ScriptedSource {
    fn start(&self, intent: LoadingIntent, sink: PipelineSink<String>) -> Subscription {
        self.runs.lock().push(Run {
            intent,
            sink: Some(sink),
        });
        Subscription::empty()
    }
}
