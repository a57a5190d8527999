use firlab::{compare_designs, read_tensors, write_designs, CompareConfig};

#[test]
fn designs_round_trip_through_safetensors() {
    let cfg = CompareConfig { n_points: 256, ..CompareConfig::default() };
    let spec = cfg.filter_spec().unwrap();
    let reports = compare_designs(&spec, &cfg).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("designs.safetensors");
    write_designs(&reports, &path).unwrap();

    let t = read_tensors(&path).unwrap();
    assert_eq!(t["freq_hz"].shape, vec![256]);
    assert_eq!(t["freq_hz"].data, reports[0].response.frequencies_hz);
    assert_eq!(t["mag_db"].shape, vec![4, 256]);
    for (d, r) in reports.iter().enumerate() {
        let row = &t["mag_db"].data[d * 256..(d + 1) * 256];
        assert_eq!(row, r.response.magnitude_db.as_slice());

        let taps = &t[&format!("taps_{}", r.method.label())];
        assert_eq!(taps.data, r.taps);
    }
    assert_eq!(t["n_taps"].data, vec![47.0, 17.0, 17.0, 17.0]);
    assert_eq!(t["kaiser_beta"].data.len(), 1);
}

#[test]
fn empty_report_list_rejected() {
    let dir = tempfile::tempdir().unwrap();
    assert!(write_designs(&[], &dir.path().join("empty.safetensors")).is_err());
}
