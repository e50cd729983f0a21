//! Three-stage sequential agent pipeline
//!
//! Travel Researcher, Budget Planner and Itinerary Planner run strictly in
//! order. Each stage gets a web-search context block plus every prior
//! stage's output, and the pipeline's result is the final stage's reply.
//! Any stage failure aborts the whole pipeline; there are no retries.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::PlannerError;
use crate::llm::{ChatMessage, LlmClient};
use crate::models::TripRequest;
use crate::search::{self, SearchTool};

/// A fixed agent persona
#[derive(Debug, Clone)]
pub struct AgentSpec {
    pub role: &'static str,
    pub goal: String,
    pub backstory: &'static str,
}

/// One task handed to an agent
#[derive(Debug, Clone)]
pub struct StageSpec {
    pub agent: AgentSpec,
    pub description: String,
    pub expected_output: &'static str,
    /// Query the stage's search tool runs before the agent is prompted
    pub search_query: String,
}

impl StageSpec {
    /// Assemble the chat messages for this stage: a system message carrying
    /// the persona and a user message carrying the task, search context and
    /// prior stage outputs.
    fn messages(&self, context: &str, history: &[StageOutcome]) -> Vec<ChatMessage> {
        let system = format!(
            "You are the {}. {}\nYour personal goal is: {}",
            self.agent.role, self.agent.backstory, self.agent.goal
        );

        let mut user = format!(
            "Current task: {}\n\nThis is the expected output: {}",
            self.description, self.expected_output
        );
        if !context.is_empty() {
            user.push_str("\n\n");
            user.push_str(context);
        }
        for prior in history {
            user.push_str(&format!("\n\nOutput from the {}:\n{}", prior.stage, prior.reply));
        }

        vec![ChatMessage::system(system), ChatMessage::user(user)]
    }
}

/// Reply produced by one completed stage
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutcome {
    /// Role of the agent that produced the reply
    pub stage: String,
    pub reply: String,
}

/// Everything the pipeline produced
#[derive(Debug, Clone, PartialEq)]
pub struct CrewReport {
    /// Per-stage replies, in execution order
    pub stages: Vec<StageOutcome>,
    /// The final stage's reply, which is the pipeline's result
    pub result: String,
}

/// The fixed researcher/budget/itinerary crew
pub struct TripCrew {
    llm: Arc<dyn LlmClient>,
    search: Arc<dyn SearchTool>,
}

impl TripCrew {
    pub fn new(llm: Arc<dyn LlmClient>, search: Arc<dyn SearchTool>) -> Self {
        Self { llm, search }
    }

    /// The three stage specs for a request, in execution order
    #[must_use]
    pub fn stages(request: &TripRequest) -> [StageSpec; 3] {
        let TripRequest {
            origin,
            destination,
            mode,
            budget,
            days,
        } = request;

        let researcher = StageSpec {
            agent: AgentSpec {
                role: "Travel Researcher",
                goal: format!(
                    "Find top attractions, public transport, weather, and hotels in {destination}."
                ),
                backstory: "Expert travel researcher with local knowledge.",
            },
            description: format!(
                "List attractions, public transport options, local weather, and top 3 hotels in {destination}."
            ),
            expected_output: "Tourist spots, transport info, weather, and hotel suggestions.",
            search_query: format!(
                "top attractions public transport weather hotels {destination}"
            ),
        };

        let budget_planner = StageSpec {
            agent: AgentSpec {
                role: "Budget Planner",
                goal: format!(
                    "Create budget for a {mode} trip from {origin} to {destination} under ₹{budget}."
                ),
                backstory: "Finance and budget expert for travelers.",
            },
            description: format!(
                "Break down travel expenses for a {mode} trip to {destination} for {days} days under ₹{budget}."
            ),
            expected_output: "Cost split across transport, stay, food, and miscellaneous.",
            search_query: format!("travel cost {origin} to {destination} by {mode}"),
        };

        let itinerary_planner = StageSpec {
            agent: AgentSpec {
                role: "Itinerary Planner",
                goal: format!(
                    "Create a {days}-day itinerary for {destination}. Include food and activity recommendations."
                ),
                backstory: "Award-winning planner for efficient travel.",
            },
            description: format!(
                "Design a {days}-day itinerary for {destination}. Include food and sightseeing."
            ),
            expected_output: "Day-by-day activities, places to eat, and fun ideas.",
            search_query: format!("{destination} {days} day itinerary food sightseeing"),
        };

        [researcher, budget_planner, itinerary_planner]
    }

    /// Run all three stages in order and return the final stage's reply
    /// along with the per-stage history.
    #[instrument(skip(self, request), fields(destination = %request.destination))]
    pub async fn kickoff(&self, request: &TripRequest) -> Result<CrewReport, PlannerError> {
        let mut history: Vec<StageOutcome> = Vec::with_capacity(3);

        for spec in Self::stages(request) {
            let context = match self.search.search(&spec.search_query).await {
                Ok(results) => search::format_context(&spec.search_query, &results),
                Err(error) => {
                    warn!(
                        stage = spec.agent.role,
                        error = format!("{error:#}"),
                        "Search failed, stage continues without context"
                    );
                    String::new()
                }
            };

            let messages = spec.messages(&context, &history);
            let reply = self
                .llm
                .chat(&messages)
                .await
                .map_err(|source| PlannerError::agent(format!("{source:#}")))?;

            info!(
                stage = spec.agent.role,
                chars = reply.content.len(),
                "Stage completed"
            );
            history.push(StageOutcome {
                stage: spec.agent.role.to_string(),
                reply: reply.content,
            });
        }

        let result = history
            .last()
            .map(|outcome| outcome.reply.clone())
            .unwrap_or_default();
        Ok(CrewReport {
            stages: history,
            result,
        })
    }
}
