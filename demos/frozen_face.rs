use sweepface::{FaceConfig, FaceTime, WatchFace};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Freeze the face at an interesting time using the bon-generated builder
    let config = FaceConfig::builder()
        .title("half past ten".to_string())
        .scale(4)
        .frozen_time(FaceTime {
            hour: 10,
            minute: 30,
            second: 45,
        })
        .build();

    println!("Displaying the face frozen at 10:30:45");
    println!("- hour disk: swept most of the way around, AM shading");
    println!("- minute ring: swept to 6 o'clock");
    println!("- second ring: swept three quarters, inverted (odd minute)");
    println!("Press Ctrl+C or close the window to exit");

    WatchFace::new(config).show()
}
