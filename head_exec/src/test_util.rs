//! Shared fixtures for the crate's unit tests
//!
//! Calibration values mirror the bench prototype's parameter files. The
//! `Shared*` wrappers keep a handle on the simulated equipment after it has
//! been boxed into an [`Equipment`] bundle, so tests can script inputs and
//! inspect what the behaviour machines did.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::cell::RefCell;
use std::rc::Rc;

use eqpt_if::sim::{SimAnalog, SimAudioPlayer, SimCamera, SimServoBoard, SimSolenoids};
use eqpt_if::{
    AnalogChannel, AnalogReader, AudioClip, AudioPlayer, CamBlock, CameraClient, ServoDriver,
    SolenoidDriver, SolenoidId,
};

use crate::brow_ctrl;
use crate::eqpt::Equipment;
use crate::eye_ctrl;
use crate::head_mgr::{Limbs, Sensors};
use crate::jaw_ctrl;
use crate::lid_ctrl;
use crate::neck_ctrl;
use crate::sensors::{ForceSensor, Microphone, Pulse};
use crate::servo_ctrl::{self, PulseRange, ServoCtrl, ServoFamily};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// An equipment bundle plus handles on the simulations inside it.
pub struct TestEqpt {
    pub eqpt: Equipment,
    pub analog: SharedAnalog,
    pub audio: SharedAudio,
    pub camera: SharedCamera,
    pub sols: SharedSolenoids,
}

#[derive(Clone, Default)]
pub struct SharedAnalog(Rc<RefCell<SimAnalog>>);

#[derive(Clone)]
pub struct SharedAudio(Rc<RefCell<SimAudioPlayer>>);

#[derive(Clone, Default)]
pub struct SharedCamera(Rc<RefCell<SimCamera>>);

#[derive(Clone, Default)]
pub struct SharedSolenoids(Rc<RefCell<SimSolenoids>>);

// ------------------------------------------------------------------------------------------------
// EQUIPMENT
// ------------------------------------------------------------------------------------------------

/// A servo controller with two simulated boards (channels 0..=31).
pub fn servo_ctrl() -> ServoCtrl {
    let boards: Vec<Box<dyn ServoDriver>> = vec![
        Box::new(SimServoBoard::new()),
        Box::new(SimServoBoard::new()),
    ];
    ServoCtrl::new(servo_params(), boards)
}

/// A full equipment bundle over simulated hardware.
pub fn equipment() -> TestEqpt {
    let analog = SharedAnalog::default();
    let audio = SharedAudio(Rc::new(RefCell::new(SimAudioPlayer::new(3))));
    let camera = SharedCamera::default();
    let sols = SharedSolenoids::default();

    let eqpt = Equipment {
        servo: servo_ctrl(),
        audio: Box::new(audio.clone()),
        camera: Box::new(camera.clone()),
        analog: Box::new(analog.clone()),
        sols: Box::new(sols.clone()),
    };

    TestEqpt {
        eqpt,
        analog,
        audio,
        camera,
        sols,
    }
}

// ------------------------------------------------------------------------------------------------
// PARAMETERS
// ------------------------------------------------------------------------------------------------

pub fn servo_params() -> servo_ctrl::Params {
    servo_ctrl::Params {
        turnigy: PulseRange {
            min_count: 100,
            max_count: 600,
        },
        towerpro: PulseRange {
            min_count: 250,
            max_count: 450,
        },
        datan: PulseRange {
            min_count: 90,
            max_count: 500,
        },
    }
}

pub fn eye_params() -> eye_ctrl::Params {
    eye_ctrl::Params {
        family: ServoFamily::Turnigy,
        step_interval_ms: 5,
        glance_pause_ms: 500,
        time_between_glance_ms: 2000,
        time_between_look_ms: 3000,
        roll_increment_deg: 1.0,
        left: eye_ctrl::EyeConfig {
            vert_channel: 5,
            hor_channel: 4,
            neutral_vert_deg: 79.0,
            neutral_hor_deg: 92.0,
            up_vert_deg: 100.0,
            down_vert_deg: 55.0,
            left_hor_deg: 65.0,
            right_hor_deg: 124.0,
        },
        right: eye_ctrl::EyeConfig {
            vert_channel: 7,
            hor_channel: 6,
            neutral_vert_deg: 50.0,
            neutral_hor_deg: 32.0,
            up_vert_deg: 30.0,
            down_vert_deg: 75.0,
            left_hor_deg: 14.0,
            right_hor_deg: 53.0,
        },
    }
}

pub fn lid_params() -> lid_ctrl::Params {
    lid_ctrl::Params {
        family: ServoFamily::Turnigy,
        step_interval_ms: 5,
        blink_pause_ms: 150,
        time_between_blink_ms: 5000,
        lazy_blink_pause_ms: 350,
        time_between_lazy_blink_ms: 3000,
        fast_blink_pause_ms: 100,
        time_between_fast_blink_ms: 1500,
        long_close_ms: 2000,
        idle_blink_min_ms: 250,
        idle_blink_max_ms: 5000,
        left: lid_ctrl::LidConfig {
            top_channel: 1,
            bot_channel: 0,
            top_close_deg: 135.0,
            top_open_deg: 75.0,
            bot_close_deg: 97.0,
            bot_open_deg: 113.0,
        },
        right: lid_ctrl::LidConfig {
            top_channel: 3,
            bot_channel: 2,
            top_close_deg: 60.0,
            top_open_deg: 125.0,
            bot_close_deg: 133.0,
            bot_open_deg: 115.0,
        },
    }
}

pub fn brow_params() -> brow_ctrl::Params {
    brow_ctrl::Params {
        family: ServoFamily::Turnigy,
        furrow_pause_ms: 250,
        slight_pause_ms: 550,
        time_between_furrow_ms: 4000,
        left: brow_ctrl::BrowConfig {
            medial_channel: 8,
            lateral_channel: 9,
            neutral_deg: (72.0, 144.0),
            furrow_deg: (85.0, 140.0),
            reg_raise_deg: (0.0, 108.0),
            slight_raise_deg: (37.0, 132.0),
        },
        right: brow_ctrl::BrowConfig {
            medial_channel: 10,
            lateral_channel: 11,
            neutral_deg: (50.0, 10.0),
            furrow_deg: (37.0, 14.0),
            reg_raise_deg: (112.0, 46.0),
            slight_raise_deg: (85.0, 22.0),
        },
    }
}

pub fn jaw_params() -> jaw_ctrl::Params {
    jaw_ctrl::Params {
        family: ServoFamily::TowerPro,
        step_interval_ms: 100,
        time_between_even_talk_ms: 250,
        time_between_fast_talk_ms: 150,
        neutral_open_percent: 20.0,
        open_thrust_percent: 20.0,
        left: jaw_ctrl::JawHalfConfig {
            vert_channel: 12,
            hor_channel: 14,
            vert_close_deg: 165.0,
            vert_open_deg: 130.0,
            hor_back_deg: 120.0,
            hor_forward_deg: 80.0,
        },
        right: jaw_ctrl::JawHalfConfig {
            vert_channel: 13,
            hor_channel: 15,
            vert_close_deg: 34.0,
            vert_open_deg: 80.0,
            hor_back_deg: 60.0,
            hor_forward_deg: 102.0,
        },
    }
}

pub fn neck_params() -> neck_ctrl::Params {
    neck_ctrl::Params {
        family: ServoFamily::Datan,
        step_interval_ms: 20,
        tolerance_deg: 2.0,
        step_increment_deg: 2.0,
        wince_increment_deg: 5.0,
        left_link_offset_deg: 60.0,
        feedback: neck_ctrl::FeedbackCal {
            min_count: 335,
            mid_count: 679,
            max_count: 1023,
            min_deg: 0.0,
            mid_deg: 135.0,
            max_deg: 270.0,
        },
        rot_center_deg: 35.0,
        rot_left_max_deg: 80.0,
        rot_right_min_deg: 0.0,
        nod_back_deg: 50.0,
        nod_fwd_deg: 150.0,
        tilt_right_deg: 50.0,
        tilt_left_deg: 160.0,
        neutral_deg: 100.0,
        right: neck_ctrl::NeckChannelConfig {
            channel: 16,
            feedback: AnalogChannel::NeckFeedbackRight,
        },
        left: neck_ctrl::NeckChannelConfig {
            channel: 17,
            feedback: AnalogChannel::NeckFeedbackLeft,
        },
        rot: neck_ctrl::NeckChannelConfig {
            channel: 18,
            feedback: AnalogChannel::NeckFeedbackRot,
        },
    }
}

pub fn sensor_params() -> crate::sensors::Params {
    crate::sensors::Params {
        force: crate::sensors::ForceParams {
            very_light_count: 100,
            light_count: 300,
            medium_count: 500,
            big_count: 800,
        },
        mic: crate::sensors::MicParams {
            offset_count: 560,
            range_count: 20,
        },
        pulse: crate::sensors::PulseParams { off_pulse_ms: 30 },
    }
}

pub fn head_params() -> crate::head_mgr::Params {
    crate::head_mgr::Params {
        quiet_period_ms: 3500,
        dialogue_responses: 2,
        hand_lost_ticks: 40,
        verbal_gaze_offset_deg: 5.0,
        neck_follow_increment_deg: 3.0,
    }
}

/// Every limb coordinator, built on the bench calibration.
pub fn limbs() -> Limbs {
    Limbs {
        eyes: eye_ctrl::Eyeballs::new(eye_params()),
        lids: lid_ctrl::Eyelids::new(lid_params()),
        brows: brow_ctrl::Eyebrows::new(brow_params()),
        jaw: jaw_ctrl::Jaw::new(jaw_params()),
        neck: neck_ctrl::Neck::new(neck_params()),
    }
}

/// The sensor adapters, built on the bench calibration.
pub fn sensors() -> Sensors {
    let params = sensor_params();
    Sensors {
        neck_force: ForceSensor::new(AnalogChannel::NeckForce, params.force),
        mic: Microphone::new(AnalogChannel::Microphone, params.mic),
        pulse: Pulse::new(params.pulse),
    }
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SharedAnalog {
    pub fn set(&self, channel: AnalogChannel, value: u16) {
        self.0.borrow_mut().set(channel, value);
    }
}

impl AnalogReader for SharedAnalog {
    fn read(&mut self, channel: AnalogChannel) -> u16 {
        self.0.borrow_mut().read(channel)
    }
}

impl SharedAudio {
    pub fn history(&self) -> Vec<AudioClip> {
        self.0.borrow().history().to_vec()
    }

    pub fn finish(&self) {
        self.0.borrow_mut().finish();
    }
}

impl AudioPlayer for SharedAudio {
    fn play(&mut self, clip: AudioClip) {
        self.0.borrow_mut().play(clip);
    }

    fn is_playing(&self) -> bool {
        self.0.borrow().is_playing()
    }

    fn update(&mut self, now_ms: u64) {
        self.0.borrow_mut().update(now_ms);
    }
}

impl SharedCamera {
    /// Report a single tracked block at the given position and age.
    pub fn set_block(&self, x: u16, y: u16, age: u8) {
        self.0.borrow_mut().set_blocks(vec![CamBlock {
            x,
            y,
            age,
            ..Default::default()
        }]);
    }

    /// Report an empty frame.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl CameraClient for SharedCamera {
    fn get_blocks(&mut self) -> Vec<CamBlock> {
        self.0.borrow_mut().get_blocks()
    }
}

impl SharedSolenoids {
    pub fn is_on(&self, id: SolenoidId) -> bool {
        self.0.borrow().is_on(id)
    }
}

impl SolenoidDriver for SharedSolenoids {
    fn set(&mut self, id: SolenoidId, energised: bool) {
        self.0.borrow_mut().set(id, energised);
    }
}
