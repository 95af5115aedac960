//! Runs advisory requests off the input thread in interactive mode.

use std::{
    sync::mpsc::{self, Receiver, Sender},
    thread,
};

use financia_ai::{Advisor, AiError, RequestGate};
use financia_domain::{AIInsight, Transaction, TransactionDraft};
use tracing::{debug, error};

/// A finished advisory request.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Insight(AIInsight),
    Draft {
        input: String,
        draft: Option<TransactionDraft>,
    },
}

#[derive(Debug)]
pub enum Submission {
    /// Running on a worker thread; collect it with [`AdvisorJobs::drain`].
    Started,
    Completed(JobOutcome),
}

pub struct AdvisorJobs {
    advisor: Advisor,
    background: bool,
    insight_gate: RequestGate,
    parse_gate: RequestGate,
    sender: Sender<JobOutcome>,
    receiver: Receiver<JobOutcome>,
}

impl AdvisorJobs {
    pub fn new(advisor: Advisor, background: bool) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            advisor,
            background,
            insight_gate: RequestGate::new("insight"),
            parse_gate: RequestGate::new("parse"),
            sender,
            receiver,
        }
    }

    /// Replaces the advisor used by subsequent requests. Requests already in
    /// flight finish with the previous one.
    pub fn set_advisor(&mut self, advisor: Advisor) {
        self.advisor = advisor;
    }

    pub fn submit_insight(&self, transactions: Vec<Transaction>) -> Result<Submission, AiError> {
        let guard = self.insight_gate.try_acquire()?;
        let advisor = self.advisor.clone();
        self.run(move || {
            let outcome = JobOutcome::Insight(advisor.request_insight(&transactions));
            drop(guard);
            outcome
        })
    }

    pub fn submit_parse(&self, input: String) -> Result<Submission, AiError> {
        let guard = self.parse_gate.try_acquire()?;
        let advisor = self.advisor.clone();
        self.run(move || {
            let draft = advisor.parse_transaction_text(&input);
            drop(guard);
            JobOutcome::Draft { input, draft }
        })
    }

    fn run<F>(&self, job: F) -> Result<Submission, AiError>
    where
        F: FnOnce() -> JobOutcome + Send + 'static,
    {
        if !self.background {
            return Ok(Submission::Completed(job()));
        }
        let sender = self.sender.clone();
        let spawned = thread::Builder::new()
            .name("financia-advisor".into())
            .spawn(move || {
                // The receiver lives as long as the shell; a closed channel
                // only means the shell is exiting.
                if sender.send(job()).is_err() {
                    debug!("advisor result dropped, shell closed");
                }
            });
        match spawned {
            Ok(_) => Ok(Submission::Started),
            Err(err) => {
                error!(error = %err, "could not start advisor thread");
                Err(AiError::Transport(err.to_string()))
            }
        }
    }

    /// Outcomes completed since the last call, in completion order.
    pub fn drain(&self) -> Vec<JobOutcome> {
        self.receiver.try_iter().collect()
    }

    /// Labels of requests still running.
    pub fn in_flight(&self) -> Vec<&'static str> {
        [&self.insight_gate, &self.parse_gate]
            .into_iter()
            .filter(|gate| gate.is_busy())
            .map(RequestGate::label)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, Condvar, Mutex},
        time::Duration,
    };

    use financia_ai::{GenerationRequest, GenerativeModel};
    use financia_domain::{seed_transactions, CategoryCatalog};

    use super::*;

    /// Blocks every call until released.
    struct HeldModel {
        released: Mutex<bool>,
        signal: Condvar,
    }

    impl HeldModel {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                released: Mutex::new(false),
                signal: Condvar::new(),
            })
        }

        fn release(&self) {
            *self.released.lock().unwrap() = true;
            self.signal.notify_all();
        }
    }

    impl GenerativeModel for HeldModel {
        fn generate(&self, _request: &GenerationRequest) -> Result<String, AiError> {
            let mut released = self.released.lock().unwrap();
            while !*released {
                released = self.signal.wait(released).unwrap();
            }
            Ok(r#"{"title":"t","message":"m","suggestion":"s","priority":"high"}"#.into())
        }

        fn name(&self) -> &str {
            "held"
        }
    }

    fn wait_for_outcome(jobs: &AdvisorJobs) -> Vec<JobOutcome> {
        for _ in 0..200 {
            let outcomes = jobs.drain();
            if !outcomes.is_empty() {
                return outcomes;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("no advisor outcome arrived");
    }

    #[test]
    fn duplicate_insight_is_refused_while_in_flight() {
        let model = HeldModel::new();
        let advisor = Advisor::new(model.clone(), CategoryCatalog::default(), "en-US");
        let jobs = AdvisorJobs::new(advisor, true);
        let history = seed_transactions(chrono::Utc::now());

        assert!(matches!(
            jobs.submit_insight(history.clone()),
            Ok(Submission::Started)
        ));
        assert!(matches!(
            jobs.submit_insight(history.clone()),
            Err(AiError::Busy("insight"))
        ));
        assert_eq!(jobs.in_flight(), vec!["insight"]);

        model.release();
        let outcomes = wait_for_outcome(&jobs);
        match &outcomes[0] {
            JobOutcome::Insight(insight) => assert_eq!(insight.title, "t"),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(jobs.in_flight().is_empty());
        assert!(jobs.submit_insight(history).is_ok());
    }

    #[test]
    fn inline_mode_completes_before_returning() {
        let model = HeldModel::new();
        model.release();
        let advisor = Advisor::new(model, CategoryCatalog::default(), "en-US");
        let jobs = AdvisorJobs::new(advisor, false);
        match jobs.submit_parse("  ".into()) {
            Ok(Submission::Completed(JobOutcome::Draft { draft, .. })) => assert!(draft.is_none()),
            other => panic!("unexpected submission {other:?}"),
        }
    }
}
