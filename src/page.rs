//! Constant page text: heading, subtitle and sources

pub const TITLE: &str = "Doping in Professional Bicycle Racing";

pub const SUBTITLE: &str = "Tour de France: 35 Fastest times up Alpe d'Huez";

/// Footer heading preceding the numbered source links
pub const SOURCES_HEADING: &str = "Sources:";

/// Attribution links, shown numbered from 1
pub const SOURCES: [&str; 4] = [
    "https://en.wikipedia.org/wiki/Alpe_d%27Huez",
    "http://www.fillarifoorumi.fi/forum/showthread.php?38129-Ammattilaispy%F6r%E4ilij%F6iden-nousutietoja-%28aika-km-h-VAM-W-W-kg-etc-%29&p=2041608#post2041608",
    "https://alex-cycle.blogspot.com/2015/07/alpe-dhuez-tdf-fastest-ascent-times.html",
    "http://www.dopeology.org/",
];
