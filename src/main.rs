use std::env;
use std::process;

use sweepface::{FaceConfig, FaceTime, WatchFace};

fn main() {
    let args: Vec<String> = env::args().collect();
    let frozen = match args.get(1) {
        Some(arg) => match parse_time(arg) {
            Some(time) => Some(time),
            None => {
                eprintln!("usage: {} [HH:MM:SS]", args[0]);
                process::exit(1);
            }
        },
        None => None,
    };

    let config = FaceConfig::builder().maybe_frozen_time(frozen).build();
    if let Err(err) = WatchFace::new(config).show() {
        eprintln!("sweepface: {err}");
        process::exit(1);
    }
}

fn parse_time(arg: &str) -> Option<FaceTime> {
    let mut parts = arg.split(':');
    let hour: u32 = parts.next()?.parse().ok()?;
    let minute: u32 = parts.next()?.parse().ok()?;
    let second: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || hour > 23 || minute > 59 || second > 59 {
        return None;
    }
    Some(FaceTime {
        hour,
        minute,
        second,
    })
}

#[cfg(test)]
mod tests {
    use super::parse_time;
    use sweepface::FaceTime;

    #[test]
    fn parses_a_valid_time() {
        assert_eq!(
            parse_time("13:05:59"),
            Some(FaceTime {
                hour: 13,
                minute: 5,
                second: 59
            })
        );
    }

    #[test]
    fn rejects_malformed_times() {
        for arg in ["24:00:00", "12:60:00", "12:00:60", "12:00", "12:00:00:00", "noon"] {
            assert_eq!(parse_time(arg), None, "{arg}");
        }
    }
}
