use precision_adc::ads1115::{
    Config, DataRate, Gain, Mode, Mux, DEFAULT_ADDRESS, DEFAULT_CONFIG, READY_COMPARATOR
};
use precision_adc::*;
use embedded_hal_mock::delay::MockNoop;
use embedded_hal_mock::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use embedded_hal_mock::pin::{Mock as PinMock, State as PinState, Transaction as PinTransaction};

const ADDR: u8 = DEFAULT_ADDRESS;

/// Expected transactions for one single-shot conversion: configuration write, conversion
/// register pointer write and 2-byte read.
fn conversion(config: u16, code: [u8; 2]) -> Vec<I2cTransaction> {
    let [msb, lsb] = config.to_be_bytes();
    vec![
        I2cTransaction::write(ADDR, vec![0x01, msb, lsb]),
        I2cTransaction::write(ADDR, vec![0x00]),
        I2cTransaction::read(ADDR, code.to_vec()),
    ]
}

#[test]
fn default_config_word() {
    let config = Config::from(DEFAULT_CONFIG);
    assert_eq!(
        config,
        Config {
            os: true,
            mux: Mux::Ain0Ain1,
            pga: Gain::Two,
            mode: Mode::SingleShot,
            data_rate: DataRate::Sps128,
            comparator: 0x03
        }
    );
    assert_eq!(u16::from(config), 0x8583);
}

#[test]
fn full_scale_halves_per_gain_step() {
    let gains = [Gain::One, Gain::Two, Gain::Four, Gain::Eight, Gain::Sixteen];
    for pair in gains.windows(2) {
        assert_eq!(pair[0].full_scale() / pair[1].full_scale(), 2.0);
    }
    assert_eq!(Gain::TwoThirds.full_scale(), 6.144);
    // Reserved PGA codes fall back to ±4.096 V
    assert_eq!(Gain::from(0x06), Gain::One);
    assert_eq!(Gain::from(0x07), Gain::One);
}

#[test]
fn conversion_time_table() {
    assert_eq!(DataRate::Sps8.conversion_time_ms(), 125);
    assert_eq!(DataRate::Sps128.conversion_time_ms(), 8);
    assert_eq!(DataRate::Sps860.conversion_time_ms(), 2);
}

#[test]
fn init() {
    let i2c = I2cMock::new(&[I2cTransaction::write(ADDR, vec![0x01, 0x85, 0x83])]);
    let mut adc = Ads1115::new(i2c, ADDR);
    adc.init().unwrap();
    assert_eq!(adc.config(), Config::default());
    adc.release().0.done();
}

#[test]
fn init_with_data_ready_programs_alert_pin() {
    let i2c = I2cMock::new(&[
        // Lo_thresh = 0x0000, Hi_thresh = 0x8000
        I2cTransaction::write(ADDR, vec![0x02, 0x00, 0x00]),
        I2cTransaction::write(ADDR, vec![0x03, 0x80, 0x00]),
        // Default word with COMP_QUE = 00
        I2cTransaction::write(ADDR, vec![0x01, 0x85, 0x80]),
    ]);
    let drdy = PinMock::new(&[]);
    let mut adc = Ads1115::with_data_ready(i2c, ADDR, drdy);
    adc.init().unwrap();
    assert_eq!(adc.config().comparator, READY_COMPARATOR);
    assert_eq!(adc.config().pga, Gain::Two);
    let (mut i2c, drdy) = adc.release();
    i2c.done();
    drdy.unwrap().done();
}

#[test]
fn reset_with_data_ready_keeps_alert_pin_enabled() {
    let i2c = I2cMock::new(&[
        I2cTransaction::write(ADDR, vec![0x02, 0x00, 0x00]),
        I2cTransaction::write(ADDR, vec![0x03, 0x80, 0x00]),
        I2cTransaction::write(ADDR, vec![0x01, 0x85, 0x80]),
        // PGA = 101
        I2cTransaction::write(ADDR, vec![0x01, 0x8B, 0x80]),
        I2cTransaction::write(ADDR, vec![0x01, 0x85, 0x80]),
    ]);
    let drdy = PinMock::new(&[]);
    let mut delay = MockNoop::new();
    let mut adc = Ads1115::with_data_ready(i2c, ADDR, drdy);
    adc.init().unwrap();
    adc.set_gain(Gain::Sixteen).unwrap();
    adc.reset(&mut delay).unwrap();
    assert_eq!(adc.config(), Config { comparator: READY_COMPARATOR, ..Config::default() });
    let (mut i2c, drdy) = adc.release();
    i2c.done();
    drdy.unwrap().done();
}

#[test]
fn set_gain_and_data_rate() {
    let i2c = I2cMock::new(&[
        // PGA = 001
        I2cTransaction::write(ADDR, vec![0x01, 0x83, 0x83]),
        // DR = 111
        I2cTransaction::write(ADDR, vec![0x01, 0x83, 0xE3]),
    ]);
    let mut adc = Ads1115::new(i2c, ADDR);
    adc.set_gain(Gain::One).unwrap();
    adc.set_data_rate(DataRate::Sps860).unwrap();
    assert_eq!(adc.gain(), Gain::One);
    assert_eq!(adc.data_rate(), DataRate::Sps860);
    adc.release().0.done();
}

#[test]
fn select_channel_does_not_write() {
    let i2c = I2cMock::new(&[]);
    let mut delay = MockNoop::new();
    let mut adc = Ads1115::new(i2c, ADDR);
    adc.select_channel(&mut delay, 3).unwrap();
    assert_eq!(adc.select_channel(&mut delay, 4), Err(Error::InvalidArgument));
    adc.release().0.done();
}

#[test]
fn read_raw_single_sample() {
    // MUX = 4 + 2, OS = 1, remaining bits from the default word
    let i2c = I2cMock::new(&conversion(0xE583, [0x12, 0x34]));
    let mut delay = MockNoop::new();
    let mut adc = Ads1115::new(i2c, ADDR);
    adc.select_channel(&mut delay, 2).unwrap();
    assert_eq!(adc.read_raw(&mut delay, 1).unwrap(), 0x1234);
    assert_eq!(adc.config().mux, Mux::Ain2Gnd);
    adc.release().0.done();
}

#[test]
fn read_raw_average_truncates_toward_zero() {
    let mut expectations = conversion(0xC583, [0xFF, 0xFF]);
    expectations.extend(conversion(0xC583, [0xFF, 0xFE]));
    let i2c = I2cMock::new(&expectations);
    let mut delay = MockNoop::new();
    let mut adc = Ads1115::new(i2c, ADDR);
    // (-1 + -2) / 2 = -1.5, truncated to -1
    assert_eq!(adc.read_raw(&mut delay, 2).unwrap(), -1);
    adc.release().0.done();
}

#[test]
fn read_raw_average_identical_codes() {
    let mut expectations = Vec::new();
    for _ in 0..3 {
        expectations.extend(conversion(0xC583, [0x80, 0x00]));
    }
    let i2c = I2cMock::new(&expectations);
    let mut delay = MockNoop::new();
    let mut adc = Ads1115::new(i2c, ADDR);
    assert_eq!(adc.read_raw(&mut delay, 3).unwrap(), -32768);
    adc.release().0.done();
}

#[test]
fn read_raw_zero_samples() {
    let i2c = I2cMock::new(&[]);
    let mut delay = MockNoop::new();
    let mut adc = Ads1115::new(i2c, ADDR);
    assert_eq!(adc.read_raw(&mut delay, 0), Err(Error::InvalidArgument));
    adc.release().0.done();
}

#[test]
fn read_voltage() {
    let mut expectations = vec![I2cTransaction::write(ADDR, vec![0x01, 0x83, 0x83])];
    expectations.extend(conversion(0xC383, [0x40, 0x00]));
    let i2c = I2cMock::new(&expectations);
    let mut delay = MockNoop::new();
    let mut adc = Ads1115::new(i2c, ADDR);
    adc.set_gain(Gain::One).unwrap();
    // 16384 * 4.096 / 32768
    assert_eq!(adc.read_voltage(&mut delay, 0, 1).unwrap(), 2.048);
    adc.release().0.done();
}

#[test]
fn configure_differential() {
    let i2c = I2cMock::new(&[
        // OS = 1, MUX = 001, PGA = 010, MODE = 1, DR = 100, comparator bits cleared
        I2cTransaction::write(ADDR, vec![0x01, 0x95, 0x80]),
    ]);
    let mut delay = MockNoop::new();
    let mut adc = Ads1115::new(i2c, ADDR);
    adc.configure_differential(&mut delay, 0, 3).unwrap();
    assert_eq!(adc.config().mux, Mux::Ain0Ain3);
    assert_eq!(adc.config().comparator, 0);
    adc.release().0.done();
}

#[test]
fn read_differential_voltage() {
    let mut expectations = vec![I2cTransaction::write(ADDR, vec![0x01, 0xB5, 0x80])];
    expectations.extend(conversion(0xB580, [0x20, 0x00]));
    let i2c = I2cMock::new(&expectations);
    let mut delay = MockNoop::new();
    let mut adc = Ads1115::new(i2c, ADDR);
    // 8192 * 2.048 / 32768
    assert_eq!(adc.read_differential_voltage(&mut delay, 2, 3, 1).unwrap(), 0.512);
    adc.release().0.done();
}

#[test]
fn unsupported_differential_pairs_are_rejected() {
    let i2c = I2cMock::new(&[]);
    let mut delay = MockNoop::new();
    let mut adc = Ads1115::new(i2c, ADDR);
    let mut rejected = 0;
    for positive in 0..5 {
        for negative in 0..5 {
            if Mux::differential(positive, negative).is_some() {
                continue;
            }
            assert_eq!(
                adc.configure_differential(&mut delay, positive, negative),
                Err(Error::InvalidArgument)
            );
            assert_eq!(
                adc.read_differential_raw(&mut delay, positive, negative, 1),
                Err(Error::InvalidArgument)
            );
            rejected += 1;
        }
    }
    assert_eq!(rejected, 21);
    assert_eq!(adc.config(), Config::default());
    adc.release().0.done();
}

#[test]
fn read_raw_waits_on_data_ready_pin() {
    let i2c = I2cMock::new(&conversion(0xC583, [0x00, 0x2A]));
    let drdy = PinMock::new(&[
        PinTransaction::get(PinState::High),
        PinTransaction::get(PinState::High),
        PinTransaction::get(PinState::Low),
    ]);
    let mut delay = MockNoop::new();
    let mut adc = Ads1115::with_data_ready(i2c, ADDR, drdy);
    assert_eq!(adc.read_raw(&mut delay, 1).unwrap(), 42);
    let (mut i2c, drdy) = adc.release();
    i2c.done();
    drdy.unwrap().done();
}

#[test]
fn read_raw_data_ready_timeout() {
    let i2c = I2cMock::new(&[I2cTransaction::write(ADDR, vec![0x01, 0xC5, 0x83])]);
    let drdy = PinMock::new(&[
        PinTransaction::get(PinState::High),
        PinTransaction::get(PinState::High),
        PinTransaction::get(PinState::High),
        PinTransaction::get(PinState::High),
    ]);
    let mut delay = MockNoop::new();
    let mut adc = Ads1115::with_data_ready(i2c, ADDR, drdy);
    adc.set_ready_timeout(ReadyTimeout { timeout_us: 30, poll_interval_us: 10 });
    assert_eq!(adc.read_raw(&mut delay, 4).unwrap(), 0);
    let (mut i2c, drdy) = adc.release();
    i2c.done();
    drdy.unwrap().done();
}

#[test]
fn is_ready() {
    let i2c = I2cMock::new(&[]);
    let adc = Ads1115::new(i2c, ADDR);
    assert_eq!(adc.is_ready(), Ok(true));
    assert_eq!(adc.address(), 0x48);

    let i2c = I2cMock::new(&[]);
    let drdy = PinMock::new(&[PinTransaction::get(PinState::High)]);
    let adc = Ads1115::with_data_ready(i2c, ADDR, drdy);
    assert_eq!(adc.is_ready(), Ok(false));
    adc.release().1.unwrap().done();
}

#[test]
fn self_test() {
    let i2c = I2cMock::new(&[
        I2cTransaction::write(ADDR, vec![0x00]),
        I2cTransaction::read(ADDR, vec![0xAB]),
    ]);
    let mut adc = Ads1115::new(i2c, ADDR);
    assert_eq!(adc.self_test().unwrap(), 0xAB);
    adc.release().0.done();
}

#[test]
fn reset() {
    let i2c = I2cMock::new(&[
        I2cTransaction::write(ADDR, vec![0x01, 0x95, 0x80]),
        I2cTransaction::write(ADDR, vec![0x01, 0x85, 0x83]),
    ]);
    let mut delay = MockNoop::new();
    let mut adc = Ads1115::new(i2c, ADDR);
    adc.configure_differential(&mut delay, 0, 3).unwrap();
    adc.reset(&mut delay).unwrap();
    assert_eq!(adc.config(), Config::default());
    adc.release().0.done();
}
