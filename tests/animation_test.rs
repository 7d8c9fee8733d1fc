use floppyviz::geometry::{sector_at_rotation, track_for_step, DiskLayout, TrackLayout, STANDARD, LEGACY};
use floppyviz::render::DISK_CANVAS;
use floppyviz::seek::ANIMATION_STEPS;
use floppyviz::{AnimationDriver, DiskModel};

#[test]
fn sector_follows_rotation() {
    for count in [1usize, 5, 9, 16, 26] {
        let span = 360.0 / count as f64;
        let mut angle = -720.0;
        while angle < 1080.0 {
            let sector = sector_at_rotation(angle, count);
            assert!(sector < count, "angle {} count {}", angle, count);
            let wrapped = angle.rem_euclid(360.0);
            assert_eq!(sector, ((wrapped / span).floor() as usize) % count);
            angle += 7.3;
        }
    }
    assert_eq!(sector_at_rotation(45.0, 16), 2);
}

#[test]
fn track_zero_is_outermost() {
    for profile in [STANDARD, LEGACY] {
        let layout = DiskLayout::fit(DISK_CANVAS, &profile);
        for tracks in [40, 80] {
            let t = TrackLayout::new(&layout, tracks);
            for track in 1..tracks {
                assert!(t.centerline(track) < t.centerline(track - 1));
            }
        }
    }
}

#[test]
fn seek_step_maps_onto_tracks() {
    assert_eq!(track_for_step(40, ANIMATION_STEPS, 80), 40);
    assert_eq!(track_for_step(0, ANIMATION_STEPS, 80), 0);
    assert_eq!(track_for_step(ANIMATION_STEPS - 1, ANIMATION_STEPS, 80), 79);
    assert_eq!(track_for_step(ANIMATION_STEPS - 1, ANIMATION_STEPS, 40), 39);
}

#[test]
fn setters_clamp_instead_of_failing() {
    let mut disk = DiskModel::new();
    disk.set_sector_count(0);
    assert_eq!(disk.sector_count(), 1);
    disk.set_sector_count(-7);
    assert_eq!(disk.sector_count(), 1);
    disk.set_envelope_transparency(1.5);
    assert_eq!(disk.envelope_transparency(), 1.0);
    disk.set_envelope_transparency(-0.5);
    assert_eq!(disk.envelope_transparency(), 0.0);

    disk.set_sector_count(16);
    disk.set_current_sector(3);
    disk.set_current_sector(16);
    assert_eq!(disk.current_sector(), 3);
}

#[test]
fn pause_resumes_from_same_step() {
    let mut d = AnimationDriver::new();
    d.play();
    d.advance(3000);
    assert_eq!(d.disk().animator().step(), 3);
    d.pause();
    d.advance(10_000);
    assert_eq!(d.disk().animator().step(), 3);
    d.play();
    d.advance(1000);
    assert_eq!(d.disk().animator().step(), 4);
    assert_eq!(d.disk().track(), track_for_step(4, ANIMATION_STEPS, 80));

    d.reset();
    assert_eq!(d.disk().animator().step(), 0);
}

#[test]
fn side_flips_twice_per_seek_step() {
    let mut d = AnimationDriver::new();
    d.play();
    d.advance(500);
    assert_eq!(d.disk().side(), 1);
    d.advance(500);
    assert_eq!(d.disk().side(), 0);
    assert_eq!(d.disk().animator().step(), 1);

    let mut single = AnimationDriver::new();
    single.disk_mut().set_double_sided(false);
    single.play();
    single.advance(1500);
    assert_eq!(single.disk().side(), 0);
}

#[test]
fn reset_restores_power_on_state() {
    let mut d = AnimationDriver::new();
    d.disk_mut().set_double_density(false);
    d.disk_mut().set_double_sided(false);
    d.disk_mut().set_operation(true);
    d.set_speed_preset(6).unwrap();
    d.play();
    d.advance(7777);
    d.reset();

    let disk = d.disk();
    assert_eq!(disk.track(), 0);
    assert_eq!(disk.side(), 0);
    assert_eq!(disk.rotation_angle(), 0.0);
    assert!(!disk.is_head_animating());
    assert!(!disk.is_write());
    assert!(disk.is_double_sided());
    assert!(disk.is_double_density());
}

#[test]
fn every_frame_is_self_consistent() {
    let mut d = AnimationDriver::new();
    d.disk_mut().set_sector_count(9);
    d.set_speed(0.25).unwrap();
    d.play();
    for _ in 0..500 {
        d.tick();
        let frame = d.scene().disk;
        assert_eq!(frame.sector, sector_at_rotation(frame.rotation, frame.sector_count));
        assert!(frame.track < frame.tracks);
        assert!(frame.rotation >= 0.0 && frame.rotation < 360.0);
    }
}
