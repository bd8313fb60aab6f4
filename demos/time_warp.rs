use sweepface::{FaceCommand, FaceConfig, FaceTime, WatchFace};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = FaceConfig::builder()
        .title("time warp".to_string())
        .tick_period(Duration::from_millis(50))
        .build();

    // Create a channel for sending accelerated clock times
    let (sender, receiver) = mpsc::channel();

    // Spawn a thread that advances the clock one minute per frame
    thread::spawn(move || {
        let mut total_seconds = 0u32;
        loop {
            total_seconds = (total_seconds + 60) % 86_400;
            let time = FaceTime {
                hour: total_seconds / 3600,
                minute: total_seconds / 60 % 60,
                second: total_seconds % 60,
            };
            if sender.send(FaceCommand::SetTime(time)).is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(50));
        }
    });

    println!("Displaying a full day of face sweeps at one minute per frame");
    println!("Press Ctrl+C or close the window to exit");

    WatchFace::new(config).show_with_commands(receiver)
}
