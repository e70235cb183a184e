use anyhow::Result;
use histenv_atari::{
    util::test::{Act, Env, EnvConfig, ScriptedEnvConfig},
    EpisodeStats, MonitorConfig, VideoSchedule,
};
use histenv_core::{error::HistEnvError, Env as _};
use tempdir::TempDir;
use test_log::test;

fn run_episode(env: &mut Env) -> Result<usize> {
    env.reset()?;
    let mut n_steps = 0;
    loop {
        let (step, _) = env.step(&Act::new(1))?;
        n_steps += 1;
        if step.is_done() {
            return Ok(n_steps);
        }
    }
}

#[test]
fn test_monitored_pixel_env() -> Result<()> {
    let tmp_dir = TempDir::new("monitored_env")?;
    let raw_config = ScriptedEnvConfig::pixel(21, 16, 3).episode_length(3);
    let config = EnvConfig::new(raw_config)
        .screen_dims((8, 8))
        .monitor(MonitorConfig::default().snapshot_dir(tmp_dir.path()));
    let mut env = Env::build(&config, 0)?;

    let log_dir = tmp_dir.path().join("gym_log");
    assert!(env.is_monitoring());
    assert_eq!(env.log_dir(), Some(log_dir.as_path()));

    for _ in 0..3 {
        assert_eq!(run_episode(&mut env)?, 3);
    }

    let stats = EpisodeStats::load(log_dir.join("stats.json"))?;
    assert_eq!(stats.episode_lengths, vec![3, 3, 3]);
    assert_eq!(stats.episode_rewards, vec![3.0, 3.0, 3.0]);

    // Raw frames of episodes 0 and 1 are stored, one per observation
    let monitor = env.monitor().unwrap();
    for id in 0..2 {
        let n_frames = std::fs::read_dir(monitor.video_dir(id))?.count();
        assert_eq!(n_frames, 4);
        let img = image::open(monitor.video_dir(id).join("frame_000000.png"))?;
        assert_eq!(img.to_rgb8().dimensions(), (16, 21));
    }
    assert!(!monitor.video_dir(2).exists());
    Ok(())
}

#[test]
fn test_reset_during_monitored_episode() -> Result<()> {
    let tmp_dir = TempDir::new("monitored_env")?;
    let monitor_config = MonitorConfig::default()
        .log_dir(tmp_dir.path())
        .video_schedule(VideoSchedule::Never);
    let config = EnvConfig::new(ScriptedEnvConfig::ram(8).episode_length(10)).monitor(monitor_config);

    let mut env = Env::build(&config, 0)?;
    env.reset()?;
    env.step(&Act::new(0))?;
    let e = env.reset().err().unwrap();
    assert_eq!(
        e.downcast_ref::<HistEnvError>(),
        Some(&HistEnvError::EpisodeInProgress(0))
    );

    let mut env = Env::build(&config.clone().force_reset(true), 0)?;
    env.reset()?;
    env.step(&Act::new(2))?;
    env.reset()?;
    env.close()?;

    let stats = EpisodeStats::load(tmp_dir.path().join("stats.json"))?;
    assert_eq!(stats.episode_lengths, vec![1]);
    assert_eq!(stats.episode_rewards, vec![2.0]);
    assert!(std::fs::read_dir(tmp_dir.path())?.all(|e| e.unwrap().file_name() != "video"));
    Ok(())
}

#[test]
fn test_unmonitored_env() -> Result<()> {
    let config = EnvConfig::new(ScriptedEnvConfig::ram(8).episode_length(4));
    let mut env = Env::build(&config, 0)?;
    assert!(!env.is_monitoring());

    // Without monitoring, resets are allowed at any time
    env.reset()?;
    env.step(&Act::new(0))?;
    env.reset()?;
    assert_eq!(run_episode(&mut env)?, 4);
    Ok(())
}

#[test]
fn test_video_without_log_is_rejected() {
    let monitor_config = MonitorConfig::default()
        .log_dir("unused")
        .record_log(false)
        .record_video(true);
    let config = EnvConfig::new(ScriptedEnvConfig::ram(8)).monitor(monitor_config);
    let e = Env::build(&config, 0).err().unwrap();
    assert!(e
        .downcast_ref::<HistEnvError>()
        .unwrap()
        .is_configuration_error());
}
