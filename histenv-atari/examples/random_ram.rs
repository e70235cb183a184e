use anyhow::Result;
use histenv_atari::{
    util::test::{Act, Env, EnvConfig, ScriptedEnvConfig},
    MonitorConfig,
};
use histenv_core::{ActionSpace, Env as _, Obs as _};
use log::info;

struct RandomPolicy {
    n_acts: usize,
}

impl RandomPolicy {
    fn sample(&mut self) -> Act {
        fastrand::u8(..self.n_acts as u8).into()
    }
}

fn env_config() -> EnvConfig {
    let log_dir = std::env::temp_dir().join("histenv_random_ram");
    EnvConfig::new(ScriptedEnvConfig::ram(128).episode_length(50).n_acts(6))
        .history_length(4)
        .monitor(MonitorConfig::default().log_dir(log_dir).record_video(false))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    fastrand::seed(42);

    let mut env = Env::build(&env_config(), 42)?;
    let mut policy = match env.action_space() {
        ActionSpace::Discrete(n_acts) => RandomPolicy { n_acts: *n_acts },
        space => anyhow::bail!("Unsupported action space: {}", space),
    };

    for episode in 0..5 {
        let obs = env.reset()?;
        info!("Episode {}: observation shape = {:?}", episode, obs.shape());

        loop {
            let (step, record) = env.step(&policy.sample())?;
            if step.is_done() {
                info!(
                    "Episode {}: reward = {}, length = {}",
                    episode,
                    record.get_scalar("episode_reward")?,
                    record.get_scalar("episode_length")?
                );
                break;
            }
        }
    }

    env.close()?;
    if let Some(dir) = env.log_dir() {
        info!("Episode statistics are in {}", dir.display());
    }

    Ok(())
}
