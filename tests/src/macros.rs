#[macro_export]
macro_rules! models {
    (
        $( $model:ident ),* $(,)?
    ) => {{
        let mut builder = rowbase::Db::builder();
        $( builder.register::<$model>(); )*
        builder
    }};
}

/// Runs each async test function against every enabled backend.
///
/// The in-memory backend always runs; MySQL runs with the `mysql` feature.
#[macro_export]
macro_rules! tests {
    (
        $(
            $( #[$attrs:meta] )*
            $f:ident
        ),+
    ) => {
        mod memory {
            $(
                #[test]
                $( #[$attrs] )*
                fn $f() {
                    let mut test = $crate::DbTest::new(
                        Box::new($crate::db::memory::SetupMemory::new())
                    );

                    test.run_test(move |test| Box::pin(async move {
                        super::$f(test).await;
                    }));
                }
            )*
        }

        #[cfg(feature = "mysql")]
        mod mysql {
            $(
                #[test]
                $( #[$attrs] )*
                fn $f() {
                    let _serial = $crate::db::mysql::serial();
                    let mut test = $crate::DbTest::new(
                        Box::new($crate::db::mysql::SetupMySQL::new())
                    );

                    test.run_test(move |test| Box::pin(async move {
                        super::$f(test).await;
                    }));
                }
            )*
        }
    };
    (
        $(
            $( #[$attrs:meta] )*
            $f:ident,
        )+
    ) => {
        $crate::tests!( $(
            $( #[$attrs] )*
            $f
        ),+ );
    }
}
