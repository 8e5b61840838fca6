use spade_crypto::analytics::{count_matches, count_runs, count_transitions, pad_to_capacity};
use spade_crypto::errors::SpadeError;
use spade_crypto::params::PublicParams;
use spade_crypto::preset::{PADDING_SENTINEL, default_group};
use spade_crypto::protocol::{
    QueryRequest, RegistrationRequest, handle_query, register_subject,
};
use spade_crypto::spade::Spade;
use spade_crypto::store::MemoryStore;

use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn happy_flow() -> Result<(), SpadeError> {
    let vector_size = 12;
    let curator_params = default_group(vector_size)?;
    let keys = Spade::new(&curator_params).setup(&mut StdRng::seed_from_u64(1234));

    // Public material travels to the subject hex-encoded, as deployments
    // exchange it out-of-band.
    let bundle_json = serde_json::to_string(&keys.public_params(&curator_params))?;
    let bundle: PublicParams = serde_json::from_str(&bundle_json)?;
    let (subject_params, public_keys) = bundle.to_parts()?;
    assert_eq!(subject_params, curator_params);

    // A short hypnogram, padded to the deployment capacity.
    let stages = [2u64, 3, 3, 3, 1, 3, 3, 2];
    let data = pad_to_capacity(PADDING_SENTINEL, vector_size, &stages);

    let mut store = MemoryStore::new();
    let mut rng = StdRng::seed_from_u64(5678);
    register_subject(
        &subject_params,
        &public_keys,
        &RegistrationRequest {
            subject_id: 42,
            data: data.clone(),
        },
        &mut store,
        &mut rng,
    )?;

    // Analyst asks how stage 3 is distributed.
    let response = handle_query(
        &curator_params,
        &keys,
        &QueryRequest {
            subject_id: 42,
            query_value: 3,
        },
        &store,
    );
    assert_eq!(response.status, "success");

    let indicator = response.decrypted_result.expect("success carries a result");
    assert_eq!(indicator, vec![0, 1, 1, 1, 0, 1, 1, 0, 0, 0, 0, 0]);
    assert_eq!(count_matches(&indicator), 5);
    assert_eq!(count_runs(&indicator), 2);
    assert_eq!(count_transitions(&indicator), 2);

    // Querying the padding sentinel marks exactly the padded tail.
    let response = handle_query(
        &curator_params,
        &keys,
        &QueryRequest {
            subject_id: 42,
            query_value: PADDING_SENTINEL,
        },
        &store,
    );
    let indicator = response.decrypted_result.expect("success carries a result");
    assert_eq!(count_matches(&indicator), vector_size - stages.len());

    Ok(())
}

#[test]
fn querying_an_unregistered_subject_reports_not_found() -> Result<(), SpadeError> {
    let params = default_group(4)?;
    let keys = Spade::new(&params).setup(&mut StdRng::seed_from_u64(9));
    let store = MemoryStore::new();

    let response = handle_query(
        &params,
        &keys,
        &QueryRequest {
            subject_id: 5,
            query_value: 1,
        },
        &store,
    );

    assert_eq!(response.status, "error");
    assert!(response.message.expect("error carries a message").contains("RecordNotFound"));
    Ok(())
}
