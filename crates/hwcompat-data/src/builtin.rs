//! Built-in reference tables.
//!
//! Order matters for the generation and chipset tables: rules address them by
//! index range, so new entries go at the end of their family.

/// Intel CPU generations by codename, oldest first.
///
/// Indices `0..12` are the generations whose integrated graphics macOS drives.
pub const INTEL_CPU_GENERATIONS: &[&str] = &[
    "Sandy Bridge",  // 0
    "Ivy Bridge",    // 1
    "Haswell",       // 2
    "Broadwell",     // 3
    "Skylake",       // 4
    "Kaby Lake",     // 5
    "Amber Lake",    // 6
    "Whiskey Lake",  // 7
    "Coffee Lake",   // 8
    "Comet Lake",    // 9
    "Ice Lake",      // 10
    "Cannon Lake",   // 11
    "Rocket Lake",   // 12
    "Tiger Lake",    // 13
    "Alder Lake",    // 14
    "Raptor Lake",   // 15
    "Meteor Lake",   // 16
    "Arrow Lake",    // 17
    "Lunar Lake",    // 18
];

/// Intel chipsets, grouped by series in release order.
///
/// Indices `110..122` hold the 500-series boards.
pub const INTEL_CHIPSETS: &[&str] = &[
    // 5-series / 3400 (0..14)
    "X58", "H55", "H57", "P55", "Q57", "B55", "HM55", "HM57", "PM55", "QM57", "QS57", "3400",
    "3420", "3450",
    // 6-series (14..30)
    "B65", "H61", "H67", "P67", "Q65", "Q67", "Z68", "HM65", "HM67", "QM67", "QS67", "UM67",
    "C202", "C204", "C206", "X79",
    // 7-series (30..44)
    "B75", "H77", "Q75", "Q77", "Z75", "Z77", "HM70", "HM75", "HM76", "HM77", "QM77", "QS77",
    "UM77", "C216",
    // 8/9-series (44..61)
    "B85", "H81", "H87", "Q85", "Q87", "Z87", "HM86", "HM87", "HM97", "QM87", "C222", "C224",
    "C226", "H97", "Z97", "X99", "C612",
    // 100-series (61..74)
    "B150", "H110", "H170", "Q150", "Q170", "Z170", "HM170", "HM175", "QM170", "QM175", "CM236",
    "C232", "C236",
    // 200-series and server (74..86)
    "B250", "H270", "Q250", "Q270", "Z270", "X299", "C422", "C621", "C622", "C624", "C627",
    "C628",
    // 300-series (86..98)
    "B360", "B365", "H310", "H370", "Q370", "Z370", "Z390", "HM370", "QM370", "CM246", "C242",
    "C246",
    // 400-series (98..110)
    "B460", "H410", "H420E", "H470", "Q470", "Q470E", "Z490", "W480", "W480E", "HM470", "QM480",
    "WM490",
    // 500-series (110..122)
    "B560", "H510", "H570", "Q570", "Z590", "W580", "HM570", "HM570E", "QM580", "QM580E",
    "RM590E", "WM590",
    // 600/700-series (122..134)
    "B660", "H610", "H670", "Q670", "Z690", "W680", "HM670", "WM690", "B760", "H770", "Z790",
    "W790",
];

/// AMD APU graphics with a working framebuffer.
pub const AMD_INTEGRATED_GPU_IDS: &[&str] = &[
    "1002-15D8", // Picasso
    "1002-15DD", // Raven Ridge
    "1002-15E7", // Barcelo
    "1002-1636", // Renoir
    "1002-1638", // Cezanne
    "1002-164C", // Lucienne
];

/// Ethernet and Wi-Fi controllers with an available driver.
pub const NETWORK_IDS: &[&str] = &[
    // Intel Ethernet
    "8086-10D3", "8086-1502", "8086-1503", "8086-1533", "8086-1539", "8086-153A", "8086-153B",
    "8086-1559", "8086-155A", "8086-156F", "8086-1570", "8086-15A0", "8086-15A1", "8086-15A2",
    "8086-15A3", "8086-15B7", "8086-15B8", "8086-15BB", "8086-15BC", "8086-15BD", "8086-15BE",
    "8086-15D7", "8086-15D8", "8086-15E3", "8086-15F3", "8086-0D4C", "8086-0D4D", "8086-0D4E",
    "8086-0D4F", "8086-0D53", "8086-0D55", "8086-125B", "8086-125C", "8086-125D", "8086-3102",
    // Intel Wi-Fi
    "8086-095A", "8086-095B", "8086-24F3", "8086-24FD", "8086-2526", "8086-2723", "8086-2725",
    "8086-02F0", "8086-06F0", "8086-34F0", "8086-43F0", "8086-A0F0",
    // Broadcom Wi-Fi
    "14E4-4331", "14E4-4353", "14E4-43A0", "14E4-43A3", "14E4-43B1", "14E4-43BA",
    // Atheros
    "168C-002A", "168C-0030", "1969-E091", "1969-E0A1", "1969-E0B1",
    // Realtek Ethernet
    "10EC-8125", "10EC-8136", "10EC-8168",
];

/// Realtek PCIe card readers.
pub const REALTEK_CARD_READER_IDS: &[&str] = &[
    "10EC-5227", "10EC-5228", "10EC-5229", "10EC-522A", "10EC-5249", "10EC-524A", "10EC-525A",
    "10EC-5260", "10EC-5286", "10EC-5287", "10EC-5289",
];

/// Intel Volume Management Device controllers.
pub const INTEL_VMD_IDS: &[&str] = &[
    "8086-09AB", "8086-467F", "8086-7D0B", "8086-9A0B", "8086-A77F", "8086-AD0B",
];

/// NVMe drives that hang or panic the storage stack.
pub const UNSUPPORTED_NVME_IDS: &[(&str, &str)] = &[
    ("144D-A808", "Samsung PM981/PM981a"),
    ("144D-A80A", "Samsung PM9A1"),
    ("1344-5404", "Micron 2200S"),
    ("1344-5405", "Micron 2300"),
    ("8086-F1A5", "Intel SSD 600p"),
    ("8086-F1A6", "Intel SSD 760p"),
];
