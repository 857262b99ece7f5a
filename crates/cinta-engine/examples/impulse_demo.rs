//! Offline render of the tape delay's impulse response.
//!
//! Feeds a single unit impulse through the engine and prints where the
//! echoes land and how fast they decay, with and without flutter.
//!
//! Run with: cargo run --example impulse_demo

use cinta_engine::{TapeDelay, TapeDelayParams};

const SAMPLE_RATE: f64 = 48000.0;
const BLOCK: usize = 512;
const RENDER_SECONDS: usize = 3;

fn render(params: &TapeDelayParams) -> Vec<f32> {
    let mut delay = TapeDelay::new();
    delay.prepare(SAMPLE_RATE, BLOCK, 2);

    let total = SAMPLE_RATE as usize * RENDER_SECONDS;
    let mut output = Vec::with_capacity(total);

    let mut first = true;
    while output.len() < total {
        let mut left = [0.0f32; BLOCK];
        let mut right = [0.0f32; BLOCK];
        if first {
            left[0] = 1.0;
            right[0] = 1.0;
            first = false;
        }
        delay.process_block(&mut [&mut left, &mut right], params);
        output.extend_from_slice(&left);
    }
    output
}

/// Find echo peaks above a floor, with a refractory window so each echo
/// counts once.
fn find_echoes(signal: &[f32]) -> Vec<(usize, f32)> {
    let mut peaks = Vec::new();
    let mut i = 0;
    while i < signal.len() {
        if signal[i].abs() > 0.02 {
            // Strongest sample within the next couple of milliseconds
            let end = (i + 96).min(signal.len());
            let (pos, level) = (i..end)
                .map(|j| (j, signal[j].abs()))
                .fold((i, 0.0f32), |acc, cur| if cur.1 > acc.1 { cur } else { acc });
            peaks.push((pos, level));
            i = pos + 2000;
        } else {
            i += 1;
        }
    }
    peaks
}

fn main() {
    println!("cinta tape delay — impulse response demo");
    println!("========================================\n");

    let params = TapeDelayParams {
        time_ms: 250.0,
        feedback: 0.55,
        mix: 1.0,
        drive: 0.3,
        flutter_amount_ms: 0.0,
        ..TapeDelayParams::default()
    };

    println!(
        "time {} ms, feedback {}, drive {}, flutter off",
        params.time_ms, params.feedback, params.drive
    );
    let clean = render(&params);
    println!("  echoes (sample, level):");
    for (pos, level) in find_echoes(&clean).iter().take(8) {
        let ms = *pos as f64 * 1000.0 / SAMPLE_RATE;
        println!("    {pos:>7}  ({ms:>7.1} ms)  {level:.4}");
    }

    let fluttered = TapeDelayParams {
        flutter_amount_ms: 1.5,
        flutter_rate_hz: 5.0,
        flutter_rand: 0.8,
        ..params
    };
    println!("\nsame, flutter 1.5 ms @ 5 Hz, randomness 0.8");
    let wobbly = render(&fluttered);
    println!("  echoes (sample, level):");
    for (pos, level) in find_echoes(&wobbly).iter().take(8) {
        let ms = *pos as f64 * 1000.0 / SAMPLE_RATE;
        println!("    {pos:>7}  ({ms:>7.1} ms)  {level:.4}");
    }

    // Tempo-synced time, resolved host-side
    let synced = TapeDelayParams {
        sync_on: true,
        sync_division: 3, // 1/8
        ..params
    };
    let bpm = 96.0;
    println!(
        "\ntempo sync: 1/8 at {bpm} BPM resolves to {:.1} ms",
        synced.resolved_time_ms(bpm)
    );
}
