//! Human-readable names for event type/code values.
//!
//! Static lookup tables only, built over the `evdev` crate's constants.
//! Capture uses these for the trailing line annotation; replay never reads
//! them, so nothing here affects correctness.

use evdev::{
    AbsoluteAxisCode as Abs, EventType, MiscCode as Msc, RelativeAxisCode as Rel,
    SynchronizationCode as Syn,
};

const EV_SYN: u16 = EventType::SYNCHRONIZATION.0;
const EV_REL: u16 = EventType::RELATIVE.0;
const EV_ABS: u16 = EventType::ABSOLUTE.0;
const EV_MSC: u16 = EventType::MISC.0;

static TYPE_NAMES: &[(u16, &str)] = &[
    (EV_SYN, "SYN"),
    (EventType::KEY.0, "KEY"),
    (EV_REL, "REL"),
    (EV_ABS, "ABS"),
    (EV_MSC, "MSC"),
    (EventType::SWITCH.0, "SW"),
    (EventType::LED.0, "LED"),
    (EventType::SOUND.0, "SND"),
    (EventType::REPEAT.0, "REP"),
    (EventType::FORCEFEEDBACK.0, "FF"),
    (EventType::POWER.0, "PWR"),
];

static SYN_NAMES: &[(u16, &str)] = &[
    (Syn::SYN_REPORT.0, "REPORT"),
    (Syn::SYN_CONFIG.0, "CONFIG"),
    (Syn::SYN_MT_REPORT.0, "MT_REPORT"),
    (Syn::SYN_DROPPED.0, "DROPPED"),
];

static REL_NAMES: &[(u16, &str)] = &[
    (Rel::REL_X.0, "X"),
    (Rel::REL_Y.0, "Y"),
    (Rel::REL_Z.0, "Z"),
    (Rel::REL_RX.0, "RX"),
    (Rel::REL_RY.0, "RY"),
    (Rel::REL_RZ.0, "RZ"),
    (Rel::REL_HWHEEL.0, "HWHEEL"),
    (Rel::REL_DIAL.0, "DIAL"),
    (Rel::REL_WHEEL.0, "WHEEL"),
    (Rel::REL_MISC.0, "MISC"),
];

static ABS_NAMES: &[(u16, &str)] = &[
    (Abs::ABS_X.0, "X"),
    (Abs::ABS_Y.0, "Y"),
    (Abs::ABS_Z.0, "Z"),
    (Abs::ABS_RX.0, "RX"),
    (Abs::ABS_RY.0, "RY"),
    (Abs::ABS_RZ.0, "RZ"),
    (Abs::ABS_THROTTLE.0, "THROTTLE"),
    (Abs::ABS_RUDDER.0, "RUDDER"),
    (Abs::ABS_WHEEL.0, "WHEEL"),
    (Abs::ABS_GAS.0, "GAS"),
    (Abs::ABS_BRAKE.0, "BRAKE"),
    (Abs::ABS_HAT0X.0, "HAT0X"),
    (Abs::ABS_HAT0Y.0, "HAT0Y"),
    (Abs::ABS_HAT1X.0, "HAT1X"),
    (Abs::ABS_HAT1Y.0, "HAT1Y"),
    (Abs::ABS_HAT2X.0, "HAT2X"),
    (Abs::ABS_HAT2Y.0, "HAT2Y"),
    (Abs::ABS_HAT3X.0, "HAT3X"),
    (Abs::ABS_HAT3Y.0, "HAT3Y"),
    (Abs::ABS_PRESSURE.0, "PRESSURE"),
    (Abs::ABS_DISTANCE.0, "DISTANCE"),
    (Abs::ABS_TILT_X.0, "TILT_X"),
    (Abs::ABS_TILT_Y.0, "TILT_Y"),
    (Abs::ABS_TOOL_WIDTH.0, "TOOL_WIDTH"),
    (Abs::ABS_VOLUME.0, "VOLUME"),
    (Abs::ABS_MISC.0, "MISC"),
    (Abs::ABS_MT_SLOT.0, "MT_SLOT"),
    (Abs::ABS_MT_TOUCH_MAJOR.0, "MT_TOUCH_MAJOR"),
    (Abs::ABS_MT_TOUCH_MINOR.0, "MT_TOUCH_MINOR"),
    (Abs::ABS_MT_WIDTH_MAJOR.0, "MT_WIDTH_MAJOR"),
    (Abs::ABS_MT_WIDTH_MINOR.0, "MT_WIDTH_MINOR"),
    (Abs::ABS_MT_ORIENTATION.0, "MT_ORIENTATION"),
    (Abs::ABS_MT_POSITION_X.0, "MT_POSITION_X"),
    (Abs::ABS_MT_POSITION_Y.0, "MT_POSITION_Y"),
    (Abs::ABS_MT_TOOL_TYPE.0, "MT_TOOL_TYPE"),
    (Abs::ABS_MT_BLOB_ID.0, "MT_BLOB_ID"),
    (Abs::ABS_MT_TRACKING_ID.0, "MT_TRACKING_ID"),
    (Abs::ABS_MT_PRESSURE.0, "MT_PRESSURE"),
    (Abs::ABS_MT_DISTANCE.0, "MT_DISTANCE"),
    (Abs::ABS_MT_TOOL_X.0, "MT_TOOL_X"),
    (Abs::ABS_MT_TOOL_Y.0, "MT_TOOL_Y"),
];

static MSC_NAMES: &[(u16, &str)] = &[
    (Msc::MSC_SERIAL.0, "SERIAL"),
    (Msc::MSC_PULSELED.0, "PULSELED"),
    (Msc::MSC_GESTURE.0, "GESTURE"),
    (Msc::MSC_RAW.0, "RAW"),
    (Msc::MSC_SCAN.0, "SCAN"),
    (Msc::MSC_TIMESTAMP.0, "TIMESTAMP"),
];

fn lookup(table: &[(u16, &'static str)], val: u16) -> Option<&'static str> {
    table.iter().find(|(v, _)| *v == val).map(|(_, name)| *name)
}

pub fn type_name(ty: u16) -> &'static str {
    lookup(TYPE_NAMES, ty).unwrap_or("Unknown")
}

/// Code names exist only for the types the log annotates in practice.
pub fn code_name(ty: u16, code: u16) -> Option<&'static str> {
    let table = match ty {
        EV_SYN => SYN_NAMES,
        EV_REL => REL_NAMES,
        EV_ABS => ABS_NAMES,
        EV_MSC => MSC_NAMES,
        _ => return None,
    };
    Some(lookup(table, code).unwrap_or("Unknown"))
}

/// Annotation suffix for a log line, e.g. "SYN REPORT" or "KEY".
pub fn describe(ty: u16, code: u16) -> String {
    match code_name(ty, code) {
        Some(code_str) => format!("{} {}", type_name(ty), code_str),
        None => type_name(ty).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(type_name(0x00), "SYN");
        assert_eq!(type_name(0x01), "KEY");
        assert_eq!(type_name(0x03), "ABS");
        assert_eq!(type_name(0x1f), "Unknown");
    }

    #[test]
    fn test_describe_with_code_table() {
        assert_eq!(describe(0x00, 0x00), "SYN REPORT");
        assert_eq!(describe(0x02, 0x08), "REL WHEEL");
        assert_eq!(describe(0x03, 0x35), "ABS MT_POSITION_X");
        assert_eq!(describe(0x04, 0x04), "MSC SCAN");
    }

    #[test]
    fn test_describe_without_code_table() {
        // keys have no code table; only the type is annotated
        assert_eq!(describe(0x01, 0x1e), "KEY");
    }

    #[test]
    fn test_describe_unknown_code() {
        assert_eq!(describe(0x00, 0xff), "SYN Unknown");
    }
}
