//! ISO 3166-1 country table with the English short names, official names
//! and common names used for lookup.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryEntry {
    pub alpha2: &'static str,
    pub alpha3: &'static str,
    pub name: &'static str,
    pub official_name: Option<&'static str>,
    pub common_name: Option<&'static str>,
}

impl CountryEntry {
    const fn new(
        alpha2: &'static str,
        alpha3: &'static str,
        name: &'static str,
        official_name: Option<&'static str>,
        common_name: Option<&'static str>,
    ) -> Self {
        Self {
            alpha2,
            alpha3,
            name,
            official_name,
            common_name,
        }
    }

    /// Every human-readable name for the country, most common first
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        [Some(self.name), self.common_name, self.official_name]
            .into_iter()
            .flatten()
    }
}

pub static COUNTRIES: &[CountryEntry] = &[
    CountryEntry::new("AW", "ABW", "Aruba", None, None),
    CountryEntry::new("AF", "AFG", "Afghanistan", Some("Islamic Republic of Afghanistan"), None),
    CountryEntry::new("AO", "AGO", "Angola", Some("Republic of Angola"), None),
    CountryEntry::new("AI", "AIA", "Anguilla", None, None),
    CountryEntry::new("AX", "ALA", "Åland Islands", None, None),
    CountryEntry::new("AL", "ALB", "Albania", Some("Republic of Albania"), None),
    CountryEntry::new("AD", "AND", "Andorra", Some("Principality of Andorra"), None),
    CountryEntry::new("AE", "ARE", "United Arab Emirates", None, None),
    CountryEntry::new("AR", "ARG", "Argentina", Some("Argentine Republic"), None),
    CountryEntry::new("AM", "ARM", "Armenia", Some("Republic of Armenia"), None),
    CountryEntry::new("AS", "ASM", "American Samoa", None, None),
    CountryEntry::new("AQ", "ATA", "Antarctica", None, None),
    CountryEntry::new("TF", "ATF", "French Southern Territories", None, None),
    CountryEntry::new("AG", "ATG", "Antigua and Barbuda", None, None),
    CountryEntry::new("AU", "AUS", "Australia", None, None),
    CountryEntry::new("AT", "AUT", "Austria", Some("Republic of Austria"), None),
    CountryEntry::new("AZ", "AZE", "Azerbaijan", Some("Republic of Azerbaijan"), None),
    CountryEntry::new("BI", "BDI", "Burundi", Some("Republic of Burundi"), None),
    CountryEntry::new("BE", "BEL", "Belgium", Some("Kingdom of Belgium"), None),
    CountryEntry::new("BJ", "BEN", "Benin", Some("Republic of Benin"), None),
    CountryEntry::new("BQ", "BES", "Bonaire, Sint Eustatius and Saba", None, None),
    CountryEntry::new("BF", "BFA", "Burkina Faso", None, None),
    CountryEntry::new("BD", "BGD", "Bangladesh", Some("People's Republic of Bangladesh"), None),
    CountryEntry::new("BG", "BGR", "Bulgaria", Some("Republic of Bulgaria"), None),
    CountryEntry::new("BH", "BHR", "Bahrain", Some("Kingdom of Bahrain"), None),
    CountryEntry::new("BS", "BHS", "Bahamas", Some("Commonwealth of the Bahamas"), None),
    CountryEntry::new("BA", "BIH", "Bosnia and Herzegovina", Some("Republic of Bosnia and Herzegovina"), None),
    CountryEntry::new("BL", "BLM", "Saint Barthélemy", None, None),
    CountryEntry::new("BY", "BLR", "Belarus", Some("Republic of Belarus"), None),
    CountryEntry::new("BZ", "BLZ", "Belize", None, None),
    CountryEntry::new("BM", "BMU", "Bermuda", None, None),
    CountryEntry::new("BO", "BOL", "Bolivia, Plurinational State of", Some("Plurinational State of Bolivia"), Some("Bolivia")),
    CountryEntry::new("BR", "BRA", "Brazil", Some("Federative Republic of Brazil"), None),
    CountryEntry::new("BB", "BRB", "Barbados", None, None),
    CountryEntry::new("BN", "BRN", "Brunei Darussalam", None, None),
    CountryEntry::new("BT", "BTN", "Bhutan", Some("Kingdom of Bhutan"), None),
    CountryEntry::new("BV", "BVT", "Bouvet Island", None, None),
    CountryEntry::new("BW", "BWA", "Botswana", Some("Republic of Botswana"), None),
    CountryEntry::new("CF", "CAF", "Central African Republic", None, None),
    CountryEntry::new("CA", "CAN", "Canada", None, None),
    CountryEntry::new("CC", "CCK", "Cocos (Keeling) Islands", None, None),
    CountryEntry::new("CH", "CHE", "Switzerland", Some("Swiss Confederation"), None),
    CountryEntry::new("CL", "CHL", "Chile", Some("Republic of Chile"), None),
    CountryEntry::new("CN", "CHN", "China", Some("People's Republic of China"), None),
    CountryEntry::new("CI", "CIV", "Côte d'Ivoire", Some("Republic of Côte d'Ivoire"), None),
    CountryEntry::new("CM", "CMR", "Cameroon", Some("Republic of Cameroon"), None),
    CountryEntry::new("CD", "COD", "Congo, The Democratic Republic of the", None, None),
    CountryEntry::new("CG", "COG", "Congo", Some("Republic of the Congo"), None),
    CountryEntry::new("CK", "COK", "Cook Islands", None, None),
    CountryEntry::new("CO", "COL", "Colombia", Some("Republic of Colombia"), None),
    CountryEntry::new("KM", "COM", "Comoros", Some("Union of the Comoros"), None),
    CountryEntry::new("CV", "CPV", "Cabo Verde", Some("Republic of Cabo Verde"), None),
    CountryEntry::new("CR", "CRI", "Costa Rica", Some("Republic of Costa Rica"), None),
    CountryEntry::new("CU", "CUB", "Cuba", Some("Republic of Cuba"), None),
    CountryEntry::new("CW", "CUW", "Curaçao", None, None),
    CountryEntry::new("CX", "CXR", "Christmas Island", None, None),
    CountryEntry::new("KY", "CYM", "Cayman Islands", None, None),
    CountryEntry::new("CY", "CYP", "Cyprus", Some("Republic of Cyprus"), None),
    CountryEntry::new("CZ", "CZE", "Czechia", Some("Czech Republic"), None),
    CountryEntry::new("DE", "DEU", "Germany", Some("Federal Republic of Germany"), None),
    CountryEntry::new("DJ", "DJI", "Djibouti", Some("Republic of Djibouti"), None),
    CountryEntry::new("DM", "DMA", "Dominica", Some("Commonwealth of Dominica"), None),
    CountryEntry::new("DK", "DNK", "Denmark", Some("Kingdom of Denmark"), None),
    CountryEntry::new("DO", "DOM", "Dominican Republic", None, None),
    CountryEntry::new("DZ", "DZA", "Algeria", Some("People's Democratic Republic of Algeria"), None),
    CountryEntry::new("EC", "ECU", "Ecuador", Some("Republic of Ecuador"), None),
    CountryEntry::new("EG", "EGY", "Egypt", Some("Arab Republic of Egypt"), None),
    CountryEntry::new("ER", "ERI", "Eritrea", Some("the State of Eritrea"), None),
    CountryEntry::new("EH", "ESH", "Western Sahara", None, None),
    CountryEntry::new("ES", "ESP", "Spain", Some("Kingdom of Spain"), None),
    CountryEntry::new("EE", "EST", "Estonia", Some("Republic of Estonia"), None),
    CountryEntry::new("ET", "ETH", "Ethiopia", Some("Federal Democratic Republic of Ethiopia"), None),
    CountryEntry::new("FI", "FIN", "Finland", Some("Republic of Finland"), None),
    CountryEntry::new("FJ", "FJI", "Fiji", Some("Republic of Fiji"), None),
    CountryEntry::new("FK", "FLK", "Falkland Islands (Malvinas)", None, None),
    CountryEntry::new("FR", "FRA", "France", Some("French Republic"), None),
    CountryEntry::new("FO", "FRO", "Faroe Islands", None, None),
    CountryEntry::new("FM", "FSM", "Micronesia, Federated States of", Some("Federated States of Micronesia"), None),
    CountryEntry::new("GA", "GAB", "Gabon", Some("Gabonese Republic"), None),
    CountryEntry::new("GB", "GBR", "United Kingdom", Some("United Kingdom of Great Britain and Northern Ireland"), None),
    CountryEntry::new("GE", "GEO", "Georgia", None, None),
    CountryEntry::new("GG", "GGY", "Guernsey", None, None),
    CountryEntry::new("GH", "GHA", "Ghana", Some("Republic of Ghana"), None),
    CountryEntry::new("GI", "GIB", "Gibraltar", None, None),
    CountryEntry::new("GN", "GIN", "Guinea", Some("Republic of Guinea"), None),
    CountryEntry::new("GP", "GLP", "Guadeloupe", None, None),
    CountryEntry::new("GM", "GMB", "Gambia", Some("Republic of the Gambia"), None),
    CountryEntry::new("GW", "GNB", "Guinea-Bissau", Some("Republic of Guinea-Bissau"), None),
    CountryEntry::new("GQ", "GNQ", "Equatorial Guinea", Some("Republic of Equatorial Guinea"), None),
    CountryEntry::new("GR", "GRC", "Greece", Some("Hellenic Republic"), None),
    CountryEntry::new("GD", "GRD", "Grenada", None, None),
    CountryEntry::new("GL", "GRL", "Greenland", None, None),
    CountryEntry::new("GT", "GTM", "Guatemala", Some("Republic of Guatemala"), None),
    CountryEntry::new("GF", "GUF", "French Guiana", None, None),
    CountryEntry::new("GU", "GUM", "Guam", None, None),
    CountryEntry::new("GY", "GUY", "Guyana", Some("Republic of Guyana"), None),
    CountryEntry::new("HK", "HKG", "Hong Kong", Some("Hong Kong Special Administrative Region of China"), None),
    CountryEntry::new("HM", "HMD", "Heard Island and McDonald Islands", None, None),
    CountryEntry::new("HN", "HND", "Honduras", Some("Republic of Honduras"), None),
    CountryEntry::new("HR", "HRV", "Croatia", Some("Republic of Croatia"), None),
    CountryEntry::new("HT", "HTI", "Haiti", Some("Republic of Haiti"), None),
    CountryEntry::new("HU", "HUN", "Hungary", None, None),
    CountryEntry::new("ID", "IDN", "Indonesia", Some("Republic of Indonesia"), None),
    CountryEntry::new("IM", "IMN", "Isle of Man", None, None),
    CountryEntry::new("IN", "IND", "India", Some("Republic of India"), None),
    CountryEntry::new("IO", "IOT", "British Indian Ocean Territory", None, None),
    CountryEntry::new("IE", "IRL", "Ireland", None, None),
    CountryEntry::new("IR", "IRN", "Iran, Islamic Republic of", Some("Islamic Republic of Iran"), Some("Iran")),
    CountryEntry::new("IQ", "IRQ", "Iraq", Some("Republic of Iraq"), None),
    CountryEntry::new("IS", "ISL", "Iceland", Some("Republic of Iceland"), None),
    CountryEntry::new("IL", "ISR", "Israel", Some("State of Israel"), None),
    CountryEntry::new("IT", "ITA", "Italy", Some("Italian Republic"), None),
    CountryEntry::new("JM", "JAM", "Jamaica", None, None),
    CountryEntry::new("JE", "JEY", "Jersey", None, None),
    CountryEntry::new("JO", "JOR", "Jordan", Some("Hashemite Kingdom of Jordan"), None),
    CountryEntry::new("JP", "JPN", "Japan", None, None),
    CountryEntry::new("KZ", "KAZ", "Kazakhstan", Some("Republic of Kazakhstan"), None),
    CountryEntry::new("KE", "KEN", "Kenya", Some("Republic of Kenya"), None),
    CountryEntry::new("KG", "KGZ", "Kyrgyzstan", Some("Kyrgyz Republic"), None),
    CountryEntry::new("KH", "KHM", "Cambodia", Some("Kingdom of Cambodia"), None),
    CountryEntry::new("KI", "KIR", "Kiribati", Some("Republic of Kiribati"), None),
    CountryEntry::new("KN", "KNA", "Saint Kitts and Nevis", None, None),
    CountryEntry::new("KR", "KOR", "Korea, Republic of", None, Some("South Korea")),
    CountryEntry::new("KW", "KWT", "Kuwait", Some("State of Kuwait"), None),
    CountryEntry::new("LA", "LAO", "Lao People's Democratic Republic", None, Some("Laos")),
    CountryEntry::new("LB", "LBN", "Lebanon", Some("Lebanese Republic"), None),
    CountryEntry::new("LR", "LBR", "Liberia", Some("Republic of Liberia"), None),
    CountryEntry::new("LY", "LBY", "Libya", None, None),
    CountryEntry::new("LC", "LCA", "Saint Lucia", None, None),
    CountryEntry::new("LI", "LIE", "Liechtenstein", Some("Principality of Liechtenstein"), None),
    CountryEntry::new("LK", "LKA", "Sri Lanka", Some("Democratic Socialist Republic of Sri Lanka"), None),
    CountryEntry::new("LS", "LSO", "Lesotho", Some("Kingdom of Lesotho"), None),
    CountryEntry::new("LT", "LTU", "Lithuania", Some("Republic of Lithuania"), None),
    CountryEntry::new("LU", "LUX", "Luxembourg", Some("Grand Duchy of Luxembourg"), None),
    CountryEntry::new("LV", "LVA", "Latvia", Some("Republic of Latvia"), None),
    CountryEntry::new("MO", "MAC", "Macao", Some("Macao Special Administrative Region of China"), None),
    CountryEntry::new("MF", "MAF", "Saint Martin (French part)", None, None),
    CountryEntry::new("MA", "MAR", "Morocco", Some("Kingdom of Morocco"), None),
    CountryEntry::new("MC", "MCO", "Monaco", Some("Principality of Monaco"), None),
    CountryEntry::new("MD", "MDA", "Moldova, Republic of", Some("Republic of Moldova"), Some("Moldova")),
    CountryEntry::new("MG", "MDG", "Madagascar", Some("Republic of Madagascar"), None),
    CountryEntry::new("MV", "MDV", "Maldives", Some("Republic of Maldives"), None),
    CountryEntry::new("MX", "MEX", "Mexico", Some("United Mexican States"), None),
    CountryEntry::new("MH", "MHL", "Marshall Islands", Some("Republic of the Marshall Islands"), None),
    CountryEntry::new("MK", "MKD", "North Macedonia", Some("Republic of North Macedonia"), None),
    CountryEntry::new("ML", "MLI", "Mali", Some("Republic of Mali"), None),
    CountryEntry::new("MT", "MLT", "Malta", Some("Republic of Malta"), None),
    CountryEntry::new("MM", "MMR", "Myanmar", Some("Republic of Myanmar"), None),
    CountryEntry::new("ME", "MNE", "Montenegro", None, None),
    CountryEntry::new("MN", "MNG", "Mongolia", None, None),
    CountryEntry::new("MP", "MNP", "Northern Mariana Islands", Some("Commonwealth of the Northern Mariana Islands"), None),
    CountryEntry::new("MZ", "MOZ", "Mozambique", Some("Republic of Mozambique"), None),
    CountryEntry::new("MR", "MRT", "Mauritania", Some("Islamic Republic of Mauritania"), None),
    CountryEntry::new("MS", "MSR", "Montserrat", None, None),
    CountryEntry::new("MQ", "MTQ", "Martinique", None, None),
    CountryEntry::new("MU", "MUS", "Mauritius", Some("Republic of Mauritius"), None),
    CountryEntry::new("MW", "MWI", "Malawi", Some("Republic of Malawi"), None),
    CountryEntry::new("MY", "MYS", "Malaysia", None, None),
    CountryEntry::new("YT", "MYT", "Mayotte", None, None),
    CountryEntry::new("NA", "NAM", "Namibia", Some("Republic of Namibia"), None),
    CountryEntry::new("NC", "NCL", "New Caledonia", None, None),
    CountryEntry::new("NE", "NER", "Niger", Some("Republic of the Niger"), None),
    CountryEntry::new("NF", "NFK", "Norfolk Island", None, None),
    CountryEntry::new("NG", "NGA", "Nigeria", Some("Federal Republic of Nigeria"), None),
    CountryEntry::new("NI", "NIC", "Nicaragua", Some("Republic of Nicaragua"), None),
    CountryEntry::new("NU", "NIU", "Niue", None, None),
    CountryEntry::new("NL", "NLD", "Netherlands", Some("Kingdom of the Netherlands"), None),
    CountryEntry::new("NO", "NOR", "Norway", Some("Kingdom of Norway"), None),
    CountryEntry::new("NP", "NPL", "Nepal", Some("Federal Democratic Republic of Nepal"), None),
    CountryEntry::new("NR", "NRU", "Nauru", Some("Republic of Nauru"), None),
    CountryEntry::new("NZ", "NZL", "New Zealand", None, None),
    CountryEntry::new("OM", "OMN", "Oman", Some("Sultanate of Oman"), None),
    CountryEntry::new("PK", "PAK", "Pakistan", Some("Islamic Republic of Pakistan"), None),
    CountryEntry::new("PA", "PAN", "Panama", Some("Republic of Panama"), None),
    CountryEntry::new("PN", "PCN", "Pitcairn", None, None),
    CountryEntry::new("PE", "PER", "Peru", Some("Republic of Peru"), None),
    CountryEntry::new("PH", "PHL", "Philippines", Some("Republic of the Philippines"), None),
    CountryEntry::new("PW", "PLW", "Palau", Some("Republic of Palau"), None),
    CountryEntry::new("PG", "PNG", "Papua New Guinea", Some("Independent State of Papua New Guinea"), None),
    CountryEntry::new("PL", "POL", "Poland", Some("Republic of Poland"), None),
    CountryEntry::new("PR", "PRI", "Puerto Rico", None, None),
    CountryEntry::new("KP", "PRK", "Korea, Democratic People's Republic of", Some("Democratic People's Republic of Korea"), Some("North Korea")),
    CountryEntry::new("PT", "PRT", "Portugal", Some("Portuguese Republic"), None),
    CountryEntry::new("PY", "PRY", "Paraguay", Some("Republic of Paraguay"), None),
    CountryEntry::new("PS", "PSE", "Palestine, State of", Some("the State of Palestine"), None),
    CountryEntry::new("PF", "PYF", "French Polynesia", None, None),
    CountryEntry::new("QA", "QAT", "Qatar", Some("State of Qatar"), None),
    CountryEntry::new("RE", "REU", "Réunion", None, None),
    CountryEntry::new("RO", "ROU", "Romania", None, None),
    CountryEntry::new("RU", "RUS", "Russian Federation", None, Some("Russia")),
    CountryEntry::new("RW", "RWA", "Rwanda", Some("Rwandese Republic"), None),
    CountryEntry::new("SA", "SAU", "Saudi Arabia", Some("Kingdom of Saudi Arabia"), None),
    CountryEntry::new("SD", "SDN", "Sudan", Some("Republic of the Sudan"), None),
    CountryEntry::new("SN", "SEN", "Senegal", Some("Republic of Senegal"), None),
    CountryEntry::new("SG", "SGP", "Singapore", Some("Republic of Singapore"), None),
    CountryEntry::new("GS", "SGS", "South Georgia and the South Sandwich Islands", None, None),
    CountryEntry::new("SH", "SHN", "Saint Helena, Ascension and Tristan da Cunha", None, None),
    CountryEntry::new("SJ", "SJM", "Svalbard and Jan Mayen", None, None),
    CountryEntry::new("SB", "SLB", "Solomon Islands", None, None),
    CountryEntry::new("SL", "SLE", "Sierra Leone", Some("Republic of Sierra Leone"), None),
    CountryEntry::new("SV", "SLV", "El Salvador", Some("Republic of El Salvador"), None),
    CountryEntry::new("SM", "SMR", "San Marino", Some("Republic of San Marino"), None),
    CountryEntry::new("SO", "SOM", "Somalia", Some("Federal Republic of Somalia"), None),
    CountryEntry::new("PM", "SPM", "Saint Pierre and Miquelon", None, None),
    CountryEntry::new("RS", "SRB", "Serbia", Some("Republic of Serbia"), None),
    CountryEntry::new("SS", "SSD", "South Sudan", Some("Republic of South Sudan"), None),
    CountryEntry::new("ST", "STP", "Sao Tome and Principe", Some("Democratic Republic of Sao Tome and Principe"), None),
    CountryEntry::new("SR", "SUR", "Suriname", Some("Republic of Suriname"), None),
    CountryEntry::new("SK", "SVK", "Slovakia", Some("Slovak Republic"), None),
    CountryEntry::new("SI", "SVN", "Slovenia", Some("Republic of Slovenia"), None),
    CountryEntry::new("SE", "SWE", "Sweden", Some("Kingdom of Sweden"), None),
    CountryEntry::new("SZ", "SWZ", "Eswatini", Some("Kingdom of Eswatini"), None),
    CountryEntry::new("SX", "SXM", "Sint Maarten (Dutch part)", None, None),
    CountryEntry::new("SC", "SYC", "Seychelles", Some("Republic of Seychelles"), None),
    CountryEntry::new("SY", "SYR", "Syrian Arab Republic", None, Some("Syria")),
    CountryEntry::new("TC", "TCA", "Turks and Caicos Islands", None, None),
    CountryEntry::new("TD", "TCD", "Chad", Some("Republic of Chad"), None),
    CountryEntry::new("TG", "TGO", "Togo", Some("Togolese Republic"), None),
    CountryEntry::new("TH", "THA", "Thailand", Some("Kingdom of Thailand"), None),
    CountryEntry::new("TJ", "TJK", "Tajikistan", Some("Republic of Tajikistan"), None),
    CountryEntry::new("TK", "TKL", "Tokelau", None, None),
    CountryEntry::new("TM", "TKM", "Turkmenistan", None, None),
    CountryEntry::new("TL", "TLS", "Timor-Leste", Some("Democratic Republic of Timor-Leste"), None),
    CountryEntry::new("TO", "TON", "Tonga", Some("Kingdom of Tonga"), None),
    CountryEntry::new("TT", "TTO", "Trinidad and Tobago", Some("Republic of Trinidad and Tobago"), None),
    CountryEntry::new("TN", "TUN", "Tunisia", Some("Republic of Tunisia"), None),
    CountryEntry::new("TR", "TUR", "Türkiye", Some("Republic of Türkiye"), Some("Turkey")),
    CountryEntry::new("TV", "TUV", "Tuvalu", None, None),
    CountryEntry::new("TW", "TWN", "Taiwan, Province of China", None, Some("Taiwan")),
    CountryEntry::new("TZ", "TZA", "Tanzania, United Republic of", Some("United Republic of Tanzania"), Some("Tanzania")),
    CountryEntry::new("UG", "UGA", "Uganda", Some("Republic of Uganda"), None),
    CountryEntry::new("UA", "UKR", "Ukraine", None, None),
    CountryEntry::new("UM", "UMI", "United States Minor Outlying Islands", None, None),
    CountryEntry::new("UY", "URY", "Uruguay", Some("Eastern Republic of Uruguay"), None),
    CountryEntry::new("US", "USA", "United States", Some("United States of America"), None),
    CountryEntry::new("UZ", "UZB", "Uzbekistan", Some("Republic of Uzbekistan"), None),
    CountryEntry::new("VA", "VAT", "Holy See (Vatican City State)", None, None),
    CountryEntry::new("VC", "VCT", "Saint Vincent and the Grenadines", None, None),
    CountryEntry::new("VE", "VEN", "Venezuela, Bolivarian Republic of", Some("Bolivarian Republic of Venezuela"), Some("Venezuela")),
    CountryEntry::new("VG", "VGB", "Virgin Islands, British", Some("British Virgin Islands"), None),
    CountryEntry::new("VI", "VIR", "Virgin Islands, U.S.", Some("Virgin Islands of the United States"), None),
    CountryEntry::new("VN", "VNM", "Viet Nam", Some("Socialist Republic of Viet Nam"), Some("Vietnam")),
    CountryEntry::new("VU", "VUT", "Vanuatu", Some("Republic of Vanuatu"), None),
    CountryEntry::new("WF", "WLF", "Wallis and Futuna", None, None),
    CountryEntry::new("WS", "WSM", "Samoa", Some("Independent State of Samoa"), None),
    CountryEntry::new("YE", "YEM", "Yemen", Some("Republic of Yemen"), None),
    CountryEntry::new("ZA", "ZAF", "South Africa", Some("Republic of South Africa"), None),
    CountryEntry::new("ZM", "ZMB", "Zambia", Some("Republic of Zambia"), None),
    CountryEntry::new("ZW", "ZWE", "Zimbabwe", Some("Republic of Zimbabwe"), None),
];

/// Informal names that are not substrings of any table entry, mapped to
/// alpha-3 codes. Keys are already in folded form.
pub static ALIASES: &[(&str, &str)] = &[
    ("usa", "USA"),
    ("us", "USA"),
    ("america", "USA"),
    ("united states of america", "USA"),
    ("estados unidos", "USA"),
    ("uk", "GBR"),
    ("great britain", "GBR"),
    ("britain", "GBR"),
    ("england", "GBR"),
    ("scotland", "GBR"),
    ("wales", "GBR"),
    ("reino unido", "GBR"),
    ("brasil", "BRA"),
    ("alemanha", "DEU"),
    ("franca", "FRA"),
    ("espanha", "ESP"),
    ("italia", "ITA"),
    ("japao", "JPN"),
    ("holland", "NLD"),
    ("czech republic", "CZE"),
    ("ivory coast", "CIV"),
    ("cape verde", "CPV"),
    ("swaziland", "SWZ"),
    ("burma", "MMR"),
    ("east timor", "TLS"),
    ("macedonia", "MKD"),
    ("vatican", "VAT"),
    ("vatican city", "VAT"),
    ("libyan arab jamahiriya", "LBY"),
    ("palestinian territory", "PSE"),
    ("netherlands antilles", "BES"),
    ("democratic republic of the congo", "COD"),
    ("dr congo", "COD"),
    ("republic of the congo", "COG"),
    ("uae", "ARE"),
    ("svalbard jan mayen islands", "SJM"),
    ("saint helena", "SHN"),
    ("macau", "MAC"),
    ("hong kong sar", "HKG"),
    ("the gambia", "GMB"),
    ("the bahamas", "BHS"),
    ("the netherlands", "NLD"),
    ("st lucia", "LCA"),
    ("st kitts and nevis", "KNA"),
    ("st vincent and the grenadines", "VCT"),
    ("republic of korea", "KOR"),
    ("turkiye", "TUR"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique_and_well_formed() {
        let mut alpha2 = HashSet::new();
        let mut alpha3 = HashSet::new();
        for c in COUNTRIES {
            assert_eq!(c.alpha2.len(), 2, "{}", c.name);
            assert_eq!(c.alpha3.len(), 3, "{}", c.name);
            assert!(alpha2.insert(c.alpha2), "duplicate alpha-2 {}", c.alpha2);
            assert!(alpha3.insert(c.alpha3), "duplicate alpha-3 {}", c.alpha3);
        }
        assert!(COUNTRIES.len() >= 245);
    }

    #[test]
    fn test_aliases_point_at_known_codes() {
        for (alias, code) in ALIASES {
            assert!(
                COUNTRIES.iter().any(|c| c.alpha3 == *code),
                "alias {alias} points at unknown code {code}"
            );
        }
    }
}
