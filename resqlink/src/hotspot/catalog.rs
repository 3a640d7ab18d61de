use super::types::{HotspotAnnotation, HotspotId, PartPlacement, Vec3};

const UNIT: Vec3 = [1.0, 1.0, 1.0];

const CIRCUIT_BOARD: PartPlacement = PartPlacement {
    assembled: [0.0, 0.0, 0.0],
    exploded: [0.0, 1.0, 0.0],
    scale: [0.9, 0.9, 0.5],
};

const ANTENNA: PartPlacement = PartPlacement {
    assembled: [0.7, 2.0, 0.0],
    exploded: [0.7, 3.5, 0.0],
    scale: UNIT,
};

const SCREEN: PartPlacement = PartPlacement {
    assembled: [0.0, 1.0, 0.41],
    exploded: [0.0, 2.0, 0.41],
    scale: UNIT,
};

const BUTTON_PANEL: PartPlacement = PartPlacement {
    assembled: [0.0, -1.2, 0.45],
    exploded: [0.0, 0.0, 0.45],
    scale: UNIT,
};

const BATTERY: PartPlacement = PartPlacement {
    assembled: [0.0, -1.9, 0.0],
    exploded: [0.0, -2.0, 0.0],
    scale: UNIT,
};

pub static RQL_X1_HOTSPOTS: [HotspotAnnotation; 5] = [
    HotspotAnnotation {
        id: HotspotId::CoreProcessor,
        part: CIRCUIT_BOARD,
        position: [0.0, 0.0, 0.2],
        label: "RL-OS Core Processor",
        description: "Dual-core custom silicon designed for auto-healing mesh routing and hardware-level AES encryption.",
    },
    HotspotAnnotation {
        id: HotspotId::Antenna,
        part: ANTENNA,
        position: [0.0, 0.6, 0.0],
        label: "High-Gain Antenna",
        description: "Extended reach LoRa transceiver capable of multi-kilometer signal propagation in zero-infrastructure environments.",
    },
    HotspotAnnotation {
        id: HotspotId::Display,
        part: SCREEN,
        position: [0.0, 0.0, 0.0],
        label: "Emergency OLED",
        description: "Ultra-low power display for critical breadcrumb navigation and incoming high-priority mesh alerts.",
    },
    HotspotAnnotation {
        id: HotspotId::SosArray,
        part: BUTTON_PANEL,
        position: [0.0, 0.0, 0.0],
        label: "Tactile SOS Array",
        description: "Glove-friendly physical inputs for immediate distress broadcasting and manual channel cycling.",
    },
    HotspotAnnotation {
        id: HotspotId::PowerCell,
        part: BATTERY,
        position: [0.0, 0.0, 0.0],
        label: "72hr Power Cell",
        description: "Advanced cold-resistant lithium unit optimized for high-reliability in sub-zero operational climates.",
    },
];

pub fn annotation(id: HotspotId) -> &'static HotspotAnnotation {
    match id {
        HotspotId::CoreProcessor => &RQL_X1_HOTSPOTS[0],
        HotspotId::Antenna => &RQL_X1_HOTSPOTS[1],
        HotspotId::Display => &RQL_X1_HOTSPOTS[2],
        HotspotId::SosArray => &RQL_X1_HOTSPOTS[3],
        HotspotId::PowerCell => &RQL_X1_HOTSPOTS[4],
    }
}

pub fn anchor(id: HotspotId, exploded: bool) -> Vec3 {
    annotation(id).anchor(exploded)
}
