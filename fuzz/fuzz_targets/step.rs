#![no_main]

use kif::Step;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|step: Step| {
    if step.seq == 0 || !step.notes.is_empty() || !step.is_well_formed() {
        return;
    }
    let line = format!("{:>4} {:<12} {}", step.seq, step.kif_move(), step.timestamp());
    let roundtripped = Step::from_kif_line(&line, None).expect("roundtrip");
    assert_eq!(step, roundtripped);
});
