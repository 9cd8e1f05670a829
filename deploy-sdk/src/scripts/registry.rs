use super::{
    error::ScriptError,
    master_of_coin::{MasterOfCoinConfig, MasterOfCoinScript},
    DeployEnvironment, DeployScript,
};

/// Deploy scripts in registration order.
#[derive(Default)]
pub struct ScriptRegistry {
    scripts: Vec<Box<dyn DeployScript>>,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, script: Box<dyn DeployScript>) {
        self.scripts.push(script);
    }

    pub fn scripts(&self) -> impl Iterator<Item = &dyn DeployScript> {
        self.scripts.iter().map(|s| s.as_ref())
    }

    /// Scripts carrying at least one of `tags`, or every script when `tags` is empty.
    pub fn select(&self, tags: &[String]) -> Vec<&dyn DeployScript> {
        self.scripts()
            .filter(|script| tags.is_empty() || script.tags().iter().any(|t| tags.contains(t)))
            .collect()
    }

    /// Runs the selected scripts one after the other and stops at the first failure.
    /// Returns the names of the scripts that ran.
    pub async fn run(
        &self,
        env: &DeployEnvironment<'_>,
        tags: &[String],
    ) -> Result<Vec<String>, ScriptError> {
        let selected = self.select(tags);
        if selected.is_empty() {
            log::warn!("no deploy script matches tags {:?}", tags);
        }
        let mut executed = Vec::with_capacity(selected.len());
        for script in selected {
            log::info!("running deploy script {} on {}", script.name(), env.network);
            script.run(env).await?;
            executed.push(script.name().to_string());
        }
        Ok(executed)
    }
}

pub fn default_registry(master_of_coin: MasterOfCoinConfig) -> ScriptRegistry {
    let mut registry = ScriptRegistry::new();
    registry.register(Box::new(MasterOfCoinScript::new(master_of_coin)));
    registry
}
