//! A small tour of `duet`.
//!
//! The game thread orbits a camera and publishes its view matrix,
//! the render thread picks the latest one up through the command queue.
//!
//! ```bash
//! RUST_LOG=debug cargo run --example threading
//! ```

use std::{
	sync::{
		Arc,
		atomic::{AtomicU64,Ordering},
	},
	time::Duration,
};
use duet::{
	CommandQueue,
	Published,
	ThreadCoordinator,
	ThreadKind,
	command::CommandKind,
	config::{InitConfig,LiveConfig},
	enqueue_render_command,
};
use log::{debug,info};

/// A column-major view matrix: rotate the world around Y, then
/// back the camera off 5 units and raise it 2.
fn view_matrix(angle: f32) -> [f32; 16] {
	let (s, c) = angle.sin_cos();
	[
		c,   0.0, -s,   0.0,
		0.0, 1.0, 0.0,  0.0,
		s,   0.0, c,    0.0,
		0.0, -2.0, -5.0, 1.0,
	]
}

fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let queue = Arc::new(CommandQueue::new());
	let camera = Arc::new(Published::new(view_matrix(0.0)));
	let camera_uploads = Arc::new(AtomicU64::new(0));
	let render_frames = Arc::new(AtomicU64::new(0));

	//---------------------------------------------------------------------------------------------------- Config
	let mut config = InitConfig {
		live: LiveConfig { game_fps: 60.0, render_fps: 60.0 },
		..InitConfig::DEFAULT
	};

	{
		let queue = Arc::clone(&queue);
		let camera = Arc::clone(&camera);
		let camera_uploads = Arc::clone(&camera_uploads);
		let mut angle = 0.0_f32;

		config.callbacks.game_tick(move |delta| {
			angle += delta * std::f32::consts::FRAC_PI_2;
			let version = camera.publish(view_matrix(angle));

			// The render thread only ever uploads the newest matrix.
			let camera = Arc::clone(&camera);
			let camera_uploads = Arc::clone(&camera_uploads);
			enqueue_render_command!(queue, UpdateCamera, move || {
				let (latest, matrix) = camera.get_versioned();
				if latest == version {
					camera_uploads.fetch_add(1, Ordering::Relaxed);
					debug!("Demo - uploading camera v{version}, x axis: {:?}", &matrix[..3]);
				}
			});
		});
	}

	{
		let render_frames = Arc::clone(&render_frames);
		config.callbacks.render_tick(move |_| {
			render_frames.fetch_add(1, Ordering::Relaxed);
		});
	}

	config.callbacks.thread_start(|kind| info!("Demo - {kind} thread starting"));

	//---------------------------------------------------------------------------------------------------- Start
	let coordinator = ThreadCoordinator::new(config, Arc::clone(&queue));
	if let Err(error) = coordinator.initialize() {
		eprintln!("failed to start: {error}");
		std::process::exit(1);
	}

	info!("Demo - main thread: {:?}", std::thread::current().id());
	info!("Demo - game thread: {:?}", coordinator.game_thread_id());
	info!("Demo - render thread: {:?}", coordinator.render_thread_id());
	info!("Demo - main is game: {}, main is render: {}", coordinator.is_in_game_thread(), coordinator.is_in_render_thread());

	//---------------------------------------------------------------------------------------------------- Commands
	for i in 1..=5 {
		queue.enqueue(CommandKind::Draw, move || info!("Demo - draw command #{i}"));
	}

	let threads = coordinator.threads();
	let dispatch = coordinator.execute_in_render_thread(move || {
		info!("Demo - deferred closure on render thread: {}", threads.is_in_render_thread());
	});
	info!("Demo - execute_in_render_thread(): {dispatch}");

	let frame = coordinator.game_frame();
	match coordinator.wait_for_game_frame(frame, Duration::from_secs(1)) {
		Ok(next) => info!("Demo - game frame {frame} -> {next}"),
		Err(error) => info!("Demo - frame wait failed: {error}"),
	}

	//---------------------------------------------------------------------------------------------------- Run
	std::thread::sleep(Duration::from_secs(2));

	info!("Demo - slowing the render thread to 30 fps...");
	coordinator.set_target_render_fps(30.0);
	std::thread::sleep(Duration::from_secs(1));

	coordinator.shutdown();

	//---------------------------------------------------------------------------------------------------- Summary
	let game = coordinator.stats(ThreadKind::Game);
	let render = coordinator.stats(ThreadKind::Render);
	println!();
	println!("game ticks      | {}", game.ticks);
	println!("render ticks    | {}", render.ticks);
	println!("render frames   | {}", render_frames.load(Ordering::Relaxed));
	println!("camera versions | {}", camera.version());
	println!("camera uploads  | {}", camera_uploads.load(Ordering::Relaxed));
	println!("commands run    | {}", queue.executed());
	println!("commands failed | {}", queue.failed());
}
