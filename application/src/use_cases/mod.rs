//! Use cases: the deliberation coordinator and the request pipeline.

pub mod deliberate;
pub mod handle_request;

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted fakes shared by the use case tests.

    use crate::ports::llm_gateway::{GatewayError, LlmGateway};
    use crate::ports::progress::ProgressSink;
    use async_trait::async_trait;
    use council_domain::{Credential, Participant, ProgressEvent, Provider, Roster};
    use std::collections::HashMap;
    use std::sync::Mutex;

    pub fn member(id: &str) -> Participant {
        Participant::new(
            id,
            Provider::DeepSeek,
            "deepseek-chat",
            Credential::new("sk-test"),
        )
    }

    pub fn roster(ids: &[&str], chair: &str) -> Roster {
        Roster::new(ids.iter().map(|id| member(id)).collect(), member(chair)).unwrap()
    }

    /// Gateway fake that answers from a per-participant queue of scripted
    /// replies, in call order. An exhausted queue fails the call, which
    /// doubles as the "service down" script.
    #[derive(Default)]
    pub struct ScriptedGateway {
        replies: Mutex<HashMap<String, Vec<Result<String, String>>>>,
        pub calls: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedGateway {
        pub fn script(self, id: &str, reply: Result<&str, &str>) -> Self {
            self.replies
                .lock()
                .unwrap()
                .entry(id.to_string())
                .or_default()
                .push(reply.map(str::to_string).map_err(str::to_string));
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn prompts_for(&self, id: &str) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|(caller, _)| caller == id)
                .map(|(_, prompt)| prompt.clone())
                .collect()
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        async fn complete(
            &self,
            participant: &Participant,
            prompt: &str,
        ) -> Result<String, GatewayError> {
            self.calls
                .lock()
                .unwrap()
                .push((participant.id.to_string(), prompt.to_string()));

            let reply = self
                .replies
                .lock()
                .unwrap()
                .get_mut(participant.id.as_str())
                .and_then(|queue| (!queue.is_empty()).then(|| queue.remove(0)));

            match reply {
                Some(Ok(text)) => Ok(text),
                Some(Err(message)) => Err(GatewayError::RequestFailed(message)),
                None => Err(GatewayError::RequestFailed(format!(
                    "no scripted reply for {}",
                    participant.id
                ))),
            }
        }
    }

    /// Sink that records every event for ordering assertions.
    #[derive(Default)]
    pub struct CollectSink {
        events: Mutex<Vec<ProgressEvent>>,
    }

    impl CollectSink {
        pub fn events(&self) -> Vec<ProgressEvent> {
            self.events.lock().unwrap().clone()
        }

        /// Indices of events for a given actor name within a stage.
        pub fn positions(
            &self,
            stage: council_domain::Stage,
            actor: &str,
        ) -> Vec<(usize, council_domain::EventStatus)> {
            self.events()
                .iter()
                .enumerate()
                .filter(|(_, e)| e.stage == stage && e.actor.name() == actor)
                .map(|(i, e)| (i, e.status))
                .collect()
        }
    }

    impl ProgressSink for CollectSink {
        fn emit(&self, event: ProgressEvent) {
            self.events.lock().unwrap().push(event);
        }
    }
}
