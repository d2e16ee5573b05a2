use isis_clv_core::{
    ALL_CLVS, ByteRange, ClvCategory, DecoderEntry, DecoderTable, GroupHandle, HELLO_CLVS,
    LSP_CLVS, OutputSink, SNP_CLVS, Severity, WalkStatus, decode_clvs, decode_region,
    make_stub_report,
};

/// Sink that only counts what it sees.
#[derive(Default)]
struct CountingSink {
    groups: usize,
    values: usize,
    diagnostics: usize,
    unknown: usize,
}

impl OutputSink for CountingSink {
    fn begin_group(&mut self, _: ClvCategory, _: &str, _: ByteRange) -> GroupHandle {
        self.groups += 1;
        GroupHandle::new(self.groups - 1)
    }

    fn emit_value(&mut self, _: GroupHandle, _: &str, _: ByteRange) {
        self.values += 1;
    }

    fn emit_diagnostic(&mut self, _: Severity, _: &str, _: ByteRange) {
        self.diagnostics += 1;
    }

    fn emit_unknown(&mut self, _: &str, _: &[u8], _: ByteRange) {
        self.unknown += 1;
    }
}

#[test]
fn group_ranges_tile_the_region() {
    let region: [u8; 17] = [
        0x01, 0x02, 0x01, 0xab, // area addresses
        0x63, 0x01, 0x00, // unknown
        0x86, 0x03, 0x0a, 0x00, 0x00, // short router ID
        0x89, 0x00, // empty hostname
        0x81, 0x01, 0xc1, // protocols supported
    ];
    let report = decode_region(&region, ALL_CLVS);
    assert_eq!(report.outcome, WalkStatus::Done);
    assert_eq!(report.records_total, 5);

    let mut spans: Vec<ByteRange> = report.groups.iter().map(|g| g.range).collect();
    spans.extend(
        report
            .diagnostics
            .iter()
            .filter(|d| d.raw.is_some())
            .map(|d| d.range),
    );
    spans.sort_by_key(|r| r.offset);
    let mut next = 0;
    for span in &spans {
        assert_eq!(span.offset, next);
        next += span.len;
    }
    assert_eq!(next, region.len());

    let nlpid = report.groups.last().expect("protocols group");
    assert_eq!(
        nlpid.values[0].text,
        "NLPID(s): IEEE 802.1aq (SPB) (0xc1)"
    );
}

#[test]
fn ipv4_list_keeps_complete_entries() {
    let mut region: Vec<u8> = vec![132, 9];
    region.extend([10, 0, 0, 1, 10, 0, 0, 2, 7]);
    let report = decode_region(&region, HELLO_CLVS);

    let group = &report.groups[0];
    assert_eq!(group.values.len(), 2);
    assert_eq!(group.values[1].text, "IP interface address: 10.0.0.2");
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(
        report.diagnostics[0].message,
        "Short IP interface address (1 vs 4)"
    );
}

#[test]
fn ipv6_list() {
    let mut region: Vec<u8> = vec![232, 18];
    region.extend([0x20, 0x01, 0x0d, 0xb8]);
    region.extend([0; 11]);
    region.push(1);
    region.extend([0xfe, 0x80]);
    let report = decode_region(&region, HELLO_CLVS);

    let group = &report.groups[0];
    assert_eq!(group.category, ClvCategory::Ipv6InterfaceAddresses);
    assert_eq!(group.values.len(), 1);
    assert_eq!(group.values[0].text, "IPv6 interface address: 2001:db8::1");
    assert_eq!(
        report.diagnostics[0].message,
        "Short IPv6 interface address (2 vs 16)"
    );
}

#[test]
fn router_id_only_in_lsp_table() {
    let region: [u8; 6] = [134, 4, 192, 0, 2, 1];
    let lsp = decode_region(&region, LSP_CLVS);
    assert_eq!(
        lsp.groups[0].values[0].text,
        "Traffic Engineering Router ID: 192.0.2.1"
    );

    let hello = decode_region(&region, HELLO_CLVS);
    assert!(hello.groups.is_empty());
    assert_eq!(hello.diagnostics[0].message, "Unknown code 134 (4)");
}

#[test]
fn authentication_variants() {
    let mut region: Vec<u8> = vec![10, 17, 54];
    region.extend((0..16u8).map(|i| 0xf0 + i));
    region.extend([10, 2, 99, 0x01]);
    region.extend([133, 3, b'k', b'e', b'y']);
    let report = decode_region(&region, HELLO_CLVS);

    assert_eq!(
        report.groups[0].values[0].text,
        "hmac-md5 (54), password (length 16) = 0xf0f1f2f3f4f5f6f7f8f9fafbfcfdfeff"
    );
    assert_eq!(report.groups[1].values[0].text, "type 0x63 (0x01)");
    assert_eq!(
        report.diagnostics[0].message,
        "authentication type 99 not supported"
    );
    assert_eq!(report.groups[2].values[0].text, "IP Authentication: key");
    assert_eq!(report.diagnostics.len(), 1);
}

#[test]
fn empty_payloads() {
    let region: [u8; 8] = [10, 0, 133, 0, 129, 0, 137, 0];
    let report = decode_region(&region, ALL_CLVS);
    assert_eq!(report.groups.len(), 4);
    assert!(report.groups[0].values.is_empty());
    assert!(report.groups[1].values.is_empty());
    assert_eq!(report.groups[2].values[0].text, "NLPID(s): --none--");
    assert_eq!(report.groups[3].values[0].text, "Hostname: --none--");
}

#[test]
fn area_address_stops_at_first_bad_entry() {
    let region = [1, 7, 2, 0x11, 0x22, 5, 0x49, 0x00, 0x01, 137, 1, b'x'];
    let report = decode_region(&region, ALL_CLVS);
    assert_eq!(report.groups[0].values.len(), 1);
    assert_eq!(report.groups[0].values[0].text, "Area address (2): 11.22");
    assert_eq!(
        report.diagnostics[0].message,
        "short address, packet says 5, we have 3 left"
    );
    assert_eq!(report.groups[1].values[0].text, "Hostname: x");
}

#[test]
fn abort_stops_processing_later_records() {
    let region = [137, 1, b'a', 229, 200, 0x80, 0x00, 137, 1, b'b'];
    let mut sink = CountingSink::default();
    let outcome = decode_clvs(&region, 0, region.len(), ALL_CLVS, &mut sink).unwrap();
    assert_eq!(outcome.status, WalkStatus::Aborted);
    assert_eq!(outcome.records, 1);
    assert_eq!(sink.groups, 1);
    assert_eq!(sink.values, 1);
    assert_eq!(sink.diagnostics, 1);
    assert_eq!(sink.unknown, 0);
}

#[test]
fn custom_table_can_shadow_builtin_decoder() {
    fn silent(
        _: &mut isis_clv_core::ByteCursor<'_>,
        _: &mut dyn OutputSink,
        _: GroupHandle,
    ) -> Result<(), isis_clv_core::ClvDiagnostic> {
        Ok(())
    }
    static ENTRIES: [DecoderEntry; 1] = [DecoderEntry {
        code: 137,
        label: "Quiet hostname",
        category: ClvCategory::Hostname,
        decoder: silent,
    }];

    let mut entries = ENTRIES.to_vec();
    entries.extend_from_slice(ALL_CLVS.entries());
    let table = DecoderTable::new(&entries);

    let mut report = make_stub_report(None);
    decode_clvs(&[137, 2, b'h', b'i'], 0, 4, table, &mut report).unwrap();
    assert_eq!(report.groups[0].label, "Quiet hostname (2)");
    assert!(report.groups[0].values.is_empty());
}

#[test]
fn snp_table_only_decodes_authentication() {
    let region = [10, 3, 1, b'p', b'w', 1, 2, 1, 0xab];
    let report = decode_region(&region, SNP_CLVS);
    assert_eq!(report.groups.len(), 1);
    assert_eq!(
        report.groups[0].values[0].text,
        "clear text (1), password (length 2) = pw"
    );
    assert_eq!(report.diagnostics[0].raw.as_deref(), Some("01ab"));
}

#[test]
fn clear_text_password_length_ignores_lossy_expansion() {
    let region: [u8; 5] = [10, 3, 1, 0xff, 0xfe];
    let report = decode_region(&region, ALL_CLVS);
    let text = &report.groups[0].values[0].text;
    assert!(text.contains("(length 2)"), "got {text}");
    assert!(report.diagnostics.is_empty());
}
